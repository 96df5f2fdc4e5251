//! Indian state and union territory codes.
//!
//! Disposal rules differ per state, so every analysis request carries the
//! two-letter code of the state the waste will be disposed in.

/// An Indian state or union territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndianState {
    AndhraPradesh,
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    TamilNadu,
    Telangana,
    Tripura,
    UttarPradesh,
    Uttarakhand,
    WestBengal,
    AndamanAndNicobar,
    Chandigarh,
    DadraAndNagarHaveli,
    DamanAndDiu,
    Delhi,
    JammuAndKashmir,
    Ladakh,
    Lakshadweep,
    Puducherry,
}

impl IndianState {
    /// All states and union territories, in form-display order.
    pub const ALL: [IndianState; 37] = [
        Self::AndhraPradesh,
        Self::ArunachalPradesh,
        Self::Assam,
        Self::Bihar,
        Self::Chhattisgarh,
        Self::Goa,
        Self::Gujarat,
        Self::Haryana,
        Self::HimachalPradesh,
        Self::Jharkhand,
        Self::Karnataka,
        Self::Kerala,
        Self::MadhyaPradesh,
        Self::Maharashtra,
        Self::Manipur,
        Self::Meghalaya,
        Self::Mizoram,
        Self::Nagaland,
        Self::Odisha,
        Self::Punjab,
        Self::Rajasthan,
        Self::Sikkim,
        Self::TamilNadu,
        Self::Telangana,
        Self::Tripura,
        Self::UttarPradesh,
        Self::Uttarakhand,
        Self::WestBengal,
        Self::AndamanAndNicobar,
        Self::Chandigarh,
        Self::DadraAndNagarHaveli,
        Self::DamanAndDiu,
        Self::Delhi,
        Self::JammuAndKashmir,
        Self::Ladakh,
        Self::Lakshadweep,
        Self::Puducherry,
    ];

    /// Two-letter wire code used in forms, the API, and the database.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AndhraPradesh => "AP",
            Self::ArunachalPradesh => "AR",
            Self::Assam => "AS",
            Self::Bihar => "BR",
            Self::Chhattisgarh => "CT",
            Self::Goa => "GA",
            Self::Gujarat => "GJ",
            Self::Haryana => "HR",
            Self::HimachalPradesh => "HP",
            Self::Jharkhand => "JH",
            Self::Karnataka => "KA",
            Self::Kerala => "KL",
            Self::MadhyaPradesh => "MP",
            Self::Maharashtra => "MH",
            Self::Manipur => "MN",
            Self::Meghalaya => "ML",
            Self::Mizoram => "MZ",
            Self::Nagaland => "NL",
            Self::Odisha => "OR",
            Self::Punjab => "PB",
            Self::Rajasthan => "RJ",
            Self::Sikkim => "SK",
            Self::TamilNadu => "TN",
            Self::Telangana => "TG",
            Self::Tripura => "TR",
            Self::UttarPradesh => "UP",
            Self::Uttarakhand => "UT",
            Self::WestBengal => "WB",
            Self::AndamanAndNicobar => "AN",
            Self::Chandigarh => "CH",
            Self::DadraAndNagarHaveli => "DH",
            Self::DamanAndDiu => "DD",
            Self::Delhi => "DL",
            Self::JammuAndKashmir => "JK",
            Self::Ladakh => "LA",
            Self::Lakshadweep => "LD",
            Self::Puducherry => "PY",
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AndhraPradesh => "Andhra Pradesh",
            Self::ArunachalPradesh => "Arunachal Pradesh",
            Self::Assam => "Assam",
            Self::Bihar => "Bihar",
            Self::Chhattisgarh => "Chhattisgarh",
            Self::Goa => "Goa",
            Self::Gujarat => "Gujarat",
            Self::Haryana => "Haryana",
            Self::HimachalPradesh => "Himachal Pradesh",
            Self::Jharkhand => "Jharkhand",
            Self::Karnataka => "Karnataka",
            Self::Kerala => "Kerala",
            Self::MadhyaPradesh => "Madhya Pradesh",
            Self::Maharashtra => "Maharashtra",
            Self::Manipur => "Manipur",
            Self::Meghalaya => "Meghalaya",
            Self::Mizoram => "Mizoram",
            Self::Nagaland => "Nagaland",
            Self::Odisha => "Odisha",
            Self::Punjab => "Punjab",
            Self::Rajasthan => "Rajasthan",
            Self::Sikkim => "Sikkim",
            Self::TamilNadu => "Tamil Nadu",
            Self::Telangana => "Telangana",
            Self::Tripura => "Tripura",
            Self::UttarPradesh => "Uttar Pradesh",
            Self::Uttarakhand => "Uttarakhand",
            Self::WestBengal => "West Bengal",
            Self::AndamanAndNicobar => "Andaman and Nicobar",
            Self::Chandigarh => "Chandigarh",
            Self::DadraAndNagarHaveli => "Dadra and Nagar Haveli",
            Self::DamanAndDiu => "Daman and Diu",
            Self::Delhi => "Delhi",
            Self::JammuAndKashmir => "Jammu and Kashmir",
            Self::Ladakh => "Ladakh",
            Self::Lakshadweep => "Lakshadweep",
            Self::Puducherry => "Puducherry",
        }
    }

    /// Parse a two-letter code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }
}
