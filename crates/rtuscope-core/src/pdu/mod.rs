pub mod fields;
pub mod function_code;

pub use fields::{
    CoilState, FunctionFields, FunctionReport, RAW_PREVIEW_LEN, RegisterMeaning, decode_function,
};
pub use function_code::{FieldLayout, FunctionCode};
