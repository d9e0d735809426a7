use serde::Deserialize;
use serde_json::{json, Value};

use crate::modules::schema::lenient_string;
use crate::services::session::{lenient_session, SessionInput};

#[derive(Debug, Default, Deserialize)]
pub struct MerchantSearchRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub bearer: Option<String>,
    #[serde(default, deserialize_with = "lenient_session")]
    pub session: Option<SessionInput>,
}

/// First merchant on the account, id and name only.
pub fn merchant_search_body() -> Value {
    json!({
        "from": 0,
        "to": 1,
        "_source": ["id", "name"],
    })
}
