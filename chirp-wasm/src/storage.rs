const TOKEN_KEY: &str = "chirp_token";

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

pub(crate) fn load_token() -> Option<String> {
    let raw = local_storage().ok()?.get_item(TOKEN_KEY).ok()??;
    parse_token(&raw)
}

pub(crate) fn save_token(token: &str) -> Result<String, String> {
    let token = parse_token(token).ok_or_else(|| "token must not be empty".to_string())?;
    local_storage()?
        .set_item(TOKEN_KEY, &token)
        .map_err(|_| "failed to save token".to_string())?;
    Ok(token)
}

pub(crate) fn clear_token() -> Result<(), String> {
    local_storage()?
        .remove_item(TOKEN_KEY)
        .map_err(|_| "failed to clear token".to_string())
}
