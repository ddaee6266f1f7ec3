/// Conflict analysis core - domain model and pure services
///
/// Nothing in this module performs I/O directly. Package metadata is
/// reached through the `PackageMetadataSource` port.
pub mod domain;
pub mod services;
