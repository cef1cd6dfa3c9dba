//! Inquiry records and the request bodies that create and mutate them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Lifecycle tag of an inquiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    Pending,
    Contacted,
    Completed,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 3] = [Self::Pending, Self::Contacted, Self::Completed];

    /// Wire and column representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Completed => "completed",
        }
    }

    /// Human-facing label used by the console
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Contacted => "Contacted",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_owned(),
            }),
        }
    }
}

/// List filter: everything, or one exact status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InquiryStatus),
}

impl StatusFilter {
    /// Parse the `status` query parameter.
    ///
    /// Absent, empty and `"all"` all mean no filter.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(Self::All),
            Some(s) => s.parse().map(Self::Only),
        }
    }

    /// Interpret the raw `status` query value as an exact-match filter.
    ///
    /// Absent, empty and `"all"` mean no filter. `None` means the value
    /// names no known status, so no stored row can match it.
    pub fn matching(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") | Some("all") => Some(Self::All),
            Some(s) => s.parse().ok().map(Self::Only),
        }
    }

    pub fn status(&self) -> Option<InquiryStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl From<InquiryStatus> for StatusFilter {
    fn from(status: InquiryStatus) -> Self {
        Self::Only(status)
    }
}

/// One submitted lease/rent request, as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub phone1: String,
    pub phone2: String,
    pub phone3: String,
    pub car_name: Option<String>,
    pub rent_type: String,
    pub months: String,
    pub business_type: String,
    pub status: InquiryStatus,
    #[serde(default)]
    pub memo: Option<String>,
    pub created_at: String,
}

impl Inquiry {
    /// Phone number joined as `p1-p2-p3`
    pub fn phone(&self) -> String {
        format!("{}-{}-{}", self.phone1, self.phone2, self.phone3)
    }
}

/// Raw POST body. Every field is optional here so that absence can be
/// reported as a validation error rather than a JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInquiryRequest {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub phone1: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub phone2: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub phone3: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub car_name: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub rent_type: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub months: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub business_type: Option<String>,
}

/// Validated inquiry ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub name: String,
    pub phone1: String,
    pub phone2: String,
    pub phone3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    pub rent_type: String,
    pub months: String,
    pub business_type: String,
}

impl CreateInquiryRequest {
    /// Check that every required field is present and non-empty.
    ///
    /// All missing fields are reported at once. An empty `car_name`
    /// becomes `None`.
    pub fn validate(self) -> Result<NewInquiry, ValidationError> {
        let mut missing = Vec::new();
        let mut required = |field: &'static str, value: Option<String>| match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                missing.push(field);
                String::new()
            }
        };

        let name = required("name", self.name);
        let phone1 = required("phone1", self.phone1);
        let phone2 = required("phone2", self.phone2);
        let phone3 = required("phone3", self.phone3);
        let rent_type = required("rent_type", self.rent_type);
        let months = required("months", self.months);
        let business_type = required("business_type", self.business_type);

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }

        Ok(NewInquiry {
            name,
            phone1,
            phone2,
            phone3,
            car_name: self.car_name.filter(|c| !c.is_empty()),
            rent_type,
            months,
            business_type,
        })
    }
}

/// Raw PATCH body.
///
/// `memo` distinguishes absent (`None`) from explicit `null`
/// (`Some(None)`), which clears the memo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInquiryRequest {
    #[serde(
        default,
        deserialize_with = "de::lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub memo: Option<Option<String>>,
}

/// The three accepted update shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryChange {
    Status(InquiryStatus),
    Memo(Option<String>),
    StatusAndMemo {
        status: InquiryStatus,
        memo: Option<String>,
    },
}

impl UpdateInquiryRequest {
    pub fn status(id: i64, status: InquiryStatus) -> Self {
        Self {
            id: Some(id),
            status: Some(status.as_str().to_owned()),
            memo: None,
        }
    }

    pub fn memo(id: i64, memo: Option<String>) -> Self {
        Self {
            id: Some(id),
            status: None,
            memo: Some(memo),
        }
    }

    /// Validate into an id and a typed change. Empty memo normalizes to `None`.
    pub fn validate(self) -> Result<(i64, InquiryChange), ValidationError> {
        let id = validate_id(self.id)?;
        let status = self
            .status
            .as_deref()
            .map(InquiryStatus::from_str)
            .transpose()?;
        let memo = self.memo.map(|m| m.filter(|s| !s.is_empty()));

        let change = match (status, memo) {
            (Some(status), Some(memo)) => InquiryChange::StatusAndMemo { status, memo },
            (Some(status), None) => InquiryChange::Status(status),
            (None, Some(memo)) => InquiryChange::Memo(memo),
            (None, None) => return Err(ValidationError::NothingToUpdate),
        };

        Ok((id, change))
    }
}

/// Require a positive inquiry id.
pub fn validate_id(id: Option<i64>) -> Result<i64, ValidationError> {
    match id {
        None | Some(0) => Err(ValidationError::Missing { field: "ID" }),
        Some(id) if id < 0 => Err(ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        }),
        Some(id) => Ok(id),
    }
}

/// Parse an id from a query-string value.
pub fn parse_id(raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let id = raw
        .map(|s| {
            s.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            })
        })
        .transpose()?;
    validate_id(id)
}

mod de {
    use serde::{Deserialize, Deserializer};

    /// Accept a string, or a number rendered as its decimal string.
    pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
            Float(f64),
        }

        Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
            Raw::Str(s) => s,
            Raw::Int(n) => n.to_string(),
            Raw::Float(n) => n.to_string(),
        }))
    }

    /// Accept an integer id or a string holding one.
    pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Int(n)) => Ok(Some(n)),
            Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Str(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid id '{}'", s))),
        }
    }

    /// Present-but-null becomes `Some(None)`; absence is handled by `default`.
    pub fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
