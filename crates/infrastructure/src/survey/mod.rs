//! Survey resource loader.

mod remote_survey_loader;

pub use remote_survey_loader::RemoteSurveyLoader;
