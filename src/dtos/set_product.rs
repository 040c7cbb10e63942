use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterSetRequest {
    pub set_id: String,
    pub set_name: String,
    #[serde(default)]
    pub product_codes: Vec<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl RegisterSetRequest {
    /// Trims identifiers and drops blank product codes.
    pub fn normalized(self) -> Self {
        Self {
            set_id: self.set_id.trim().to_string(),
            set_name: self.set_name.trim().to_string(),
            product_codes: self
                .product_codes
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            remarks: self
                .remarks
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SetListQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}
