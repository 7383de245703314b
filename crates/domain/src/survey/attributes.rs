//! Attribute payloads of survey resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attributes of a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAttributes {
    /// Survey title.
    pub title: String,
    /// Survey description.
    pub description: String,
    /// Thank-you email sent when the score is above the threshold.
    pub thank_email_above_threshold: String,
    /// Thank-you email sent when the score is below the threshold.
    pub thank_email_below_threshold: String,
    /// Whether the survey currently accepts responses.
    pub is_active: bool,
    /// Cover image URL.
    pub cover_image_url: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Activation instant.
    pub active_at: DateTime<Utc>,
    /// Deactivation instant, if any.
    pub inactive_at: Option<DateTime<Utc>>,
    /// Free-form survey category, e.g. `Restaurant`.
    pub survey_type: String,
}

/// Attributes of a survey detail (question or answer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDetailAttributes {
    /// Text shown to the respondent.
    pub text: String,
    /// Optional help text.
    pub help_text: Option<String>,
    /// Position within the survey.
    pub display_order: u32,
    /// Short label.
    pub short_text: String,
    /// Selection mode, e.g. `one`, `any` or `none`.
    pub pick: String,
    /// Rendering hint, e.g. `intro`, `star`, `choice`.
    pub display_type: String,
    /// Whether an answer is required.
    pub is_mandatory: bool,
    /// Id of the correct answer for quiz questions.
    pub correct_answer_id: Option<String>,
    /// Facebook profile to share to.
    pub facebook_profile: Option<String>,
    /// Twitter profile to share to.
    pub twitter_profile: Option<String>,
    /// Image URL.
    pub image_url: String,
    /// Cover image URL.
    pub cover_image_url: String,
    /// Cover image opacity in `[0, 1]`.
    pub cover_image_opacity: f64,
    /// Cover background color.
    pub cover_background_color: Option<String>,
    /// Whether the question may be shared on Facebook.
    pub is_shareable_on_facebook: bool,
    /// Whether the question may be shared on Twitter.
    pub is_shareable_on_twitter: bool,
    /// Font face override.
    pub font_face: Option<String>,
    /// Font size override.
    pub font_size: Option<String>,
    /// Raw tag list.
    pub tag_list: String,
}
