/// Package metadata adapters backed by the local NuGet global packages folder
mod caching_metadata_source;
mod local_package_cache;
mod nuspec_parser;

pub use caching_metadata_source::CachingMetadataSource;
pub use local_package_cache::NuGetCacheMetadataSource;
pub use nuspec_parser::parse_nuspec;
