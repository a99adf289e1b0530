mod brief;
mod record;
mod validate;

pub use brief::ClientBrief;
pub use record::{ClientRecord, DEFAULT_JSON_INDENT};
pub use validate::{
    is_valid_address, is_valid_id, is_valid_name, is_valid_ownership_type, is_valid_phone,
    validate_field, Field,
};
