use serde::Deserialize;

use crate::modules::schema::{lenient_number, lenient_string};
use crate::services::session::{lenient_session, SessionInput};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutasiRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub bearer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub merchant_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_ymd: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub session: Option<SessionInput>,
}
