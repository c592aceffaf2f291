/// Identifier of an auth subject. Opaque to the panel (the backend issues UUIDs).
pub type UserId = String;
