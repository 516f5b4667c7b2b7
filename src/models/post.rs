use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Assigned by the server on create; `None` for drafts.
    #[serde(
        default,
        deserialize_with = "nonzero_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u32>,
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(user_id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.id, Some(id) if id != 0)
    }
}

fn nonzero_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<u32>::deserialize(deserializer)?;
    Ok(id.filter(|id| *id != 0))
}
