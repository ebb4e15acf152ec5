pub mod identity;
pub mod json_document;
pub mod object_id;
pub mod owner_email;
pub mod validated_json;

pub use identity::Identity;
pub use json_document::JsonDocument;
pub use object_id::PathObjectId;
pub use owner_email::OwnerEmail;
pub use validated_json::ValidatedJson;
