use std::fmt::Display;

use arbitrary_int::{u4, Number};
use snafu::prelude::*;

#[cfg(test)]
mod tests;

/// Convert binary-coded decimal value into a normal number.
///
/// If every bit in the digits is set, then the number is assumed to be absent (None).
pub(crate) fn from_bcd_hundreds<THundreds>(
    hundreds: THundreds,
    tens: u4,
    units: u4,
) -> Result<Option<u16>, FastWhatever>
where
    THundreds: Display + PartialOrd + Copy + Number,
    u8: From<THundreds> + From<u4>,
{
    if hundreds == THundreds::MAX && tens == u4::MAX && units == u4::MAX {
        return Ok(None);
    }
    if u8::from(hundreds) > 9u8 {
        whatever!("hundreds place value of {} is greater than 9", hundreds);
    }
    if tens.value() > 9u8 {
        whatever!("tens place value of {} is greater than 9", tens);
    }
    if units.value() > 9u8 {
        whatever!("units place value of {} is greater than 9", units);
    }
    Ok(Some(
        u16::from(u8::from(hundreds)) * 100
            + u16::from(tens.value()) * 10
            + u16::from(units.value()),
    ))
}

/// Convert binary-coded decimal value into a normal number.
///
/// If every bit in the digits is set, then the number is assumed to be absent (None).
pub(crate) fn from_bcd_tens<TTens>(tens: TTens, units: u4) -> Result<Option<u8>, FastWhatever>
where
    TTens: Display + PartialOrd + Copy + Number,
    u8: From<TTens>,
{
    if tens == TTens::MAX && units == u4::MAX {
        return Ok(None);
    }
    if u8::from(tens) > 9u8 {
        whatever!("tens place value of {} is greater than 9", tens);
    }
    if units.value() > 9u8 {
        whatever!("units place value of {} is greater than 9", units);
    }
    Ok(Some(u8::from(tens) * 10 + units.value()))
}

/// Error type similar to [`snafu::Whatever`] but without the (slow to gather) backtrace.
#[derive(Debug, Snafu)]
#[allow(missing_docs)]
pub(crate) enum FastWhatever {
    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
        // There is intentionally not a backtrace here, since they are slow and we could encounter
        // a lot of these errors when reading bad videotapes.
    },
}

/// Declare a public enum alongside a "raw" [`bitbybit::bitenum`] with matching discriminants, and
/// generate the `From` conversions between the two.
///
/// Every value of the raw bitenum maps to exactly one value of the public enum: there is no
/// sentinel value for "no information" (use [`optional_enum`] for that case).
macro_rules! required_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $val:expr
            ),* $(,)?
        }

        $(#[$raw_attr:meta])*
        $raw_vis:vis enum $raw_name:ident;
    ) => {
        $(#[$enum_meta])*
        $enum_vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $val
            ),*
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $(#[$raw_attr])*
        $raw_vis enum $raw_name {
            $($variant = $val),*
        }

        impl From<$raw_name> for $name {
            fn from(value: $raw_name) -> Self {
                match value {
                    $($raw_name::$variant => $name::$variant),*
                }
            }
        }

        impl From<$name> for $raw_name {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $raw_name::$variant),*
                }
            }
        }
    };
}

pub(crate) use required_enum;

/// Declare a public enum alongside a "raw" [`bitbybit::bitenum`] with matching discriminants, and
/// generate the `From` conversions between the two.
///
/// The raw bitenum has one extra variant beyond those declared on the public enum, which
/// represents the absence of a value. That extra variant converts to/from `None`, while all
/// other raw variants convert to/from `Some(...)` of the corresponding public enum variant.
macro_rules! optional_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $val:expr
            ),* $(,)?
        }

        $(#[$raw_attr:meta])*
        $raw_vis:vis enum $raw_name:ident {
            $(#[$none_meta:meta])*
            $none_variant:ident = $none_val:expr $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        $enum_vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $val
            ),*
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $(#[$raw_attr])*
        $raw_vis enum $raw_name {
            $($variant = $val,)*
            $(#[$none_meta])*
            $none_variant = $none_val,
        }

        impl From<$raw_name> for Option<$name> {
            fn from(value: $raw_name) -> Self {
                match value {
                    $($raw_name::$variant => Some($name::$variant),)*
                    $raw_name::$none_variant => None,
                }
            }
        }

        impl From<Option<$name>> for $raw_name {
            fn from(value: Option<$name>) -> Self {
                match value {
                    $(Some($name::$variant) => $raw_name::$variant,)*
                    None => $raw_name::$none_variant,
                }
            }
        }
    };
}

pub(crate) use optional_enum;
