//! Survey use cases.

mod authenticated;

pub use authenticated::SurveyLoaderWithAuth;
