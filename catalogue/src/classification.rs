//! Classification token tables for galaxies and stars.

use std::str::FromStr;

use strum::IntoEnumIterator;

/// Find the variant of a closed token table whose token equals `token`.
fn lookup<T>(token: &str) -> Option<T>
where
    T: IntoEnumIterator + Copy + Into<&'static str>,
{
    let token = token.trim();
    T::iter().find(|variant| Into::<&'static str>::into(*variant) == token)
}

/// Hubble morphological class of a galaxy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum HubbleType {
    #[default]
    Unassigned,
    E0,
    E1,
    E2,
    E3,
    E4,
    E5,
    E6,
    E7,
    S0,
    Sa,
    Sb,
    Sc,
    SBa,
    SBb,
    SBc,
    Irr,
}

/// Harvard spectral class.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum SpectralType {
    #[default]
    Unassigned,
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

/// Yerkes (MK) luminosity class.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum LuminosityClass {
    #[default]
    Unassigned,
    #[strum(to_string = "0")]
    Zero,
    #[strum(to_string = "Ia+")]
    IaPlus,
    Ia,
    Iab,
    Ib,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

macro_rules! token_table {
    ($ty:ident, $what:literal) => {
        impl $ty {
            /// Token used for this value in object records.
            pub fn token(self) -> &'static str {
                self.into()
            }

            /// Resolve a record token, returning `None` if it is not in the table.
            pub fn from_token(token: &str) -> Option<Self> {
                lookup(token)
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::from_token(s).ok_or_else(|| format!(concat!("Invalid ", $what, ": {}"), s))
            }
        }
    };
}

token_table!(HubbleType, "Hubble type");
token_table!(SpectralType, "spectral type");
token_table!(LuminosityClass, "luminosity class");
