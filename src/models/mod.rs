pub mod submission;
pub mod value;

pub use submission::{
    Calculation, FieldKind, Question, Quiz, Submission, SubmissionsPage, UrlParameter,
};
pub use value::Value;
