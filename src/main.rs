fn main() -> anyhow::Result<()> {
    mc_clean_lib::run()
}
