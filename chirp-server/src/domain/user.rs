use serde::Deserialize;

/// Запись пользователя в том виде, в котором её отдаёт identity provider.
///
/// Остальные поля провайдера (метаданные, внешние аккаунты, пароль) при
/// десериализации отбрасываются. Наружу уходит только [`ProjectedUser`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IdentityRecord {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) username: Option<String>,
    #[serde(default)]
    pub(crate) profile_image_url: String,
    #[serde(default)]
    pub(crate) first_name: Option<String>,
    #[serde(default)]
    pub(crate) last_name: Option<String>,
    #[serde(default)]
    pub(crate) primary_email_address_id: Option<String>,
    #[serde(default)]
    pub(crate) email_addresses: Vec<EmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmailAddress {
    pub(crate) id: String,
    pub(crate) email_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectedUser {
    pub(crate) id: String,
    pub(crate) username: Option<String>,
    pub(crate) profile_image_url: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
}

impl From<&IdentityRecord> for ProjectedUser {
    fn from(record: &IdentityRecord) -> Self {
        let email = record.primary_email_address_id.as_deref().and_then(|primary_id| {
            record
                .email_addresses
                .iter()
                .find(|address| address.id == primary_id)
                .map(|address| address.email_address.clone())
        });

        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            profile_image_url: record.profile_image_url.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email,
        }
    }
}

/// `@alice` -> `alice`. Снимается ровно один ведущий `@`.
pub(crate) fn normalize_handle(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix('@').unwrap_or(raw)
}
