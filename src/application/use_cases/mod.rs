/// Use cases module containing application business logic orchestration
mod analyze_solution;

pub use analyze_solution::AnalyzeSolutionUseCase;
