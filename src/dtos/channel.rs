use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateChannelRequest {
    pub channel_code: String,
    pub channel_name: String,
    #[serde(default)]
    pub channel_details: Vec<String>,
}
