use shared::UpdatePregnancyInfoRequest;
use tracing::{error, info, warn};

use crate::domain::session_gate::Route;
use crate::domain::validation::{parse_due_date, parse_gender, parse_pregnancy_week};
use crate::error::{UserAlert, ValidationError, NOT_SIGNED_IN};
use crate::services::api::PregnancyApi;
use crate::services::date_utils::format_form_date;
use crate::services::session::SessionContext;
use crate::state::ActionOutcome;

const UPDATE_FAILED: &str = "Không thể cập nhật";

/// Pregnancy details form shown when the profile is incomplete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillInfoForm {
    /// YYYY-MM-DD
    pub due_date: String,
    pub baby_name: String,
    /// "Nam" or "Nữ"
    pub gender: String,
    pub pregnancy_week: String,
}

impl FillInfoForm {
    pub fn validate(&self) -> Result<UpdatePregnancyInfoRequest, ValidationError> {
        if self.due_date.trim().is_empty()
            || self.gender.trim().is_empty()
            || self.pregnancy_week.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.baby_name.trim().is_empty() {
            return Err(ValidationError::MissingBabyName);
        }

        let due_date = parse_due_date(&self.due_date)?;
        let pregnancy_week = parse_pregnancy_week(&self.pregnancy_week)?;
        let gender = parse_gender(&self.gender)?;
        Ok(UpdatePregnancyInfoRequest {
            due_date: format_form_date(due_date),
            baby_name: self.baby_name.trim().to_string(),
            gender,
            pregnancy_week,
        })
    }

    /// Save the details and move on to the dashboard
    pub async fn submit(&self, api: &dyn PregnancyApi, session: &SessionContext) -> ActionOutcome {
        let Some(token) = session.token().await else {
            return ActionOutcome::alert(UserAlert::error(NOT_SIGNED_IN));
        };

        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => return ActionOutcome::alert(e.into()),
        };

        match api.update_pregnancy_info(&token, &request).await {
            Ok(()) => {
                info!("🤰 Pregnancy info saved: week {}", request.pregnancy_week);
                ActionOutcome::navigate(
                    UserAlert::success("Cập nhật thông tin thai kỳ thành công!"),
                    Route::Dashboard,
                )
            }
            Err(e) if e.is_rejection() => {
                warn!("Pregnancy info update rejected: {}", e);
                let message = e.server_message().unwrap_or(UPDATE_FAILED);
                ActionOutcome::alert(UserAlert::error(message))
            }
            Err(e) => {
                error!("Pregnancy info update error: {}", e);
                ActionOutcome::alert(UserAlert::error(UPDATE_FAILED))
            }
        }
    }
}
