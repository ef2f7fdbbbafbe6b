//! Macro for declaring port error enums with snake_case constructors.
//!
//! Each variant gets a constructor named after it: `Duplicate { message }`
//! yields `duplicate(message: impl Into<String>)`, unit variants yield a
//! zero-argument constructor.

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@fields $variant () () $( $field : $ty, )*);
    };

    (@fields $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@fields $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @fields
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum FeedError {
            Closed => "feed closed",
            Lagged { skipped: u64 } => "feed lagged by {skipped}",
            Rejected { reason: String, attempts: u32 } => "rejected after {attempts}: {reason}",
        }
    }

    #[rstest]
    fn unit_variant_constructor() {
        assert_eq!(FeedError::closed(), FeedError::Closed);
        assert_eq!(FeedError::closed().to_string(), "feed closed");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        assert_eq!(FeedError::lagged(7_u64).to_string(), "feed lagged by 7");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = FeedError::rejected("quota", 3_u32);
        assert_eq!(err.to_string(), "rejected after 3: quota");
    }
}
