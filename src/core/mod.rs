// ─── Launcher Cleaner Core ───
// Finds the files installed versions still need and sweeps the rest.
//
// Architecture:
//   core/
//     layout/       — Paths inside a launcher data root
//     version/      — Version JSON reader + library entry shapes
//     maven/        — Maven coordinate parser
//     assets/       — Asset index reader
//     reachability/ — Builds the reachable asset/library sets
//     sweep/        — Deletes unreachable files and empty directories
//     error/        — Error and diagnostic types

pub mod assets;
pub mod error;
pub mod layout;
pub mod maven;
pub mod reachability;
pub mod sweep;
pub mod version;
