use md_error::Error;
use md_query::{PatchDocument, Record};

/// Reconciles the id in the path with the optional id in the body.
pub fn resolve_id(path_id: &str, body_id: &Option<String>) -> Result<String, Error> {
    if path_id.is_empty() {
        return Err(Error::BadRequest("Id cannot be empty".to_owned()));
    }
    match body_id {
        Some(body_id) if !body_id.is_empty() && body_id != path_id => {
            Err(Error::BadRequest("Id not match".to_owned()))
        }
        _ => Ok(path_id.to_owned()),
    }
}

pub fn require_id(path_id: &str) -> Result<&str, Error> {
    match path_id.is_empty() {
        true => Err(Error::BadRequest("Id cannot be empty".to_owned())),
        false => Ok(path_id),
    }
}

/// Decodes a patch body for `R`, with the already resolved id as the row key.
pub fn patch_document<R: Record>(
    id: String,
    mut data: serde_json::Map<String, serde_json::Value>,
) -> Result<PatchDocument, Error> {
    data.insert("id".to_owned(), serde_json::Value::String(id));
    Ok(PatchDocument::from_serde_json(R::column_map()?, &data)?)
}
