use serde::{Deserialize, Serialize};

/// City and postal code of a business. Either part may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl BusinessLocation {
    /// `"City, 90401"`, skipping missing parts.
    #[must_use]
    pub fn display(&self) -> String {
        [self.city.as_deref(), self.zip_code.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCategory {
    pub title: String,
    pub alias: String,
}

/// One business as returned by the directory API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Meters from the searched location. Absent for lookups by id.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub location: BusinessLocation,
    #[serde(default)]
    pub categories: Vec<BusinessCategory>,
}

impl BusinessRecord {
    #[must_use]
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}

/// A decoded page of results: the upstream total plus the records returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub total: u32,
    pub records: Vec<BusinessRecord>,
}

/// The results currently on display.
///
/// `records == None` means no request has completed yet, while `Some(vec![])`
/// means a request completed with zero matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPage {
    pub total: Option<u32>,
    pub records: Option<Vec<BusinessRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_with_missing_optional_fields() {
        let json = serde_json::json!({
            "id": "abc",
            "name": "Joe's Diner",
            "url": "https://example.com/biz/abc",
            "distance": null,
            "photos": [],
            "location": { "city": "Santa Monica", "zip_code": null }
        });
        let rec: BusinessRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rec.id, "abc");
        assert!(rec.distance.is_none());
        assert!(rec.categories.is_empty());
        assert_eq!(rec.location.display(), "Santa Monica");
        assert!(rec.primary_photo().is_none());
    }

    #[test]
    fn location_display_joins_city_and_zip() {
        let loc = BusinessLocation {
            city: Some("Santa Monica".to_string()),
            zip_code: Some("90401".to_string()),
        };
        assert_eq!(loc.display(), "Santa Monica, 90401");
        assert_eq!(BusinessLocation::default().display(), "");
    }
}
