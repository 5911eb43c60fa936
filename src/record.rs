////////////////////////////////////////////////////////////
// Resolved state
////////////////////////////////////////////////////////////
/// Addresses observed during one run. `bound_ip` is empty when the name has no
/// address published yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    pub wan_ip: String,
    pub bound_ip: String,
}

impl ResolvedState {
    pub fn needs_update(&self) -> bool {
        needs_update(&self.wan_ip, &self.bound_ip)
    }
}

pub fn needs_update(wan_ip: &str, bound_ip: &str) -> bool {
    wan_ip != bound_ip
}

////////////////////////////////////////////////////////////
// Provider Record
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    pub name: String,
    pub r#type: RecordType,
    pub content: String,
    pub ttl: u32,
    pub comment: Option<String>,
}

impl ProviderRecord {
    pub fn new_a(name: &str, content: &str, ttl: u32) -> Self {
        Self {
            name: name.to_string(),
            r#type: RecordType::A,
            content: content.to_string(),
            ttl,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}
