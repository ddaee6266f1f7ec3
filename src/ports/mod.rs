/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the only seam between the analysis
/// core and the file system, console and report destinations.
pub mod outbound;
