#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

macro_rules! id_type {
    ($name: ident) => {
        #[derive(
            ::derive_more::Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord,
        )]
        pub struct $name(::uuid::Uuid);

        impl $name {
            #[must_use]
            pub fn nil() -> Self {
                Self(::uuid::Uuid::nil())
            }

            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<u128> for $name {
            fn from(value: u128) -> Self {
                Self(::uuid::Uuid::from_bytes(value.to_be_bytes()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

mod catalog;
mod error;
mod metrics;
mod name;
mod plan;
mod plan_editor;
mod progress;
mod service;
mod session;
mod statistics;
mod training;
mod variant;
mod workout;

pub use catalog::*;
pub use error::*;
pub use metrics::*;
pub use name::*;
pub use plan::*;
pub use plan_editor::*;
pub use progress::*;
pub use service::*;
pub use session::*;
pub use statistics::*;
pub use training::*;
pub use variant::*;
pub use workout::*;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_id_from_u128() {
        assert_eq!(
            WorkoutID::from(1).to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert!(SetID::nil().is_nil());
        assert!(!SetID::random().is_nil());
        assert_ne!(PlanID::random(), PlanID::random());
    }
}
