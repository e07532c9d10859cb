use serde::{Deserialize, Serialize};

/// A book record.
///
/// `isbn` is the natural lookup key but uniqueness is not enforced; `price`
/// is an opaque string (e.g. `"32$"`) and is never validated.
///
/// The serde names are the HTTP JSON shape (`ID`, `Isbn`, ...). Stored
/// documents use lowercase field names; see the MongoDB backend.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    // ---
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Isbn")]
    pub isbn: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Author")]
    pub author: Author,
}

/// Embedded author, owned exclusively by its book.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    // ---
    #[serde(rename = "FirstName")]
    pub firstname: String,
    #[serde(rename = "LastName")]
    pub lastname: String,
}

impl Author {
    // ---
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        // ---
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// The three sample records inserted at startup.
pub fn seed_books() -> Vec<Book> {
    // ---
    let training = |id: &str, isbn: &str, title: &str, price: &str| Book {
        id: id.to_string(),
        isbn: isbn.to_string(),
        title: title.to_string(),
        price: price.to_string(),
        author: Author::new("John", "Doe"),
    };

    vec![
        training("1", "9812005321", "Kubernetes Training", "32$"),
        training("2", "47192038471", "Kubernetes Training - Part 2", "20$"),
        training("3", "360123401", "Kubernetes Training - Part 3", "25$"),
    ]
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    #[test]
    fn seed_has_three_distinct_records() {
        // ---
        let seed = seed_books();
        let ids: Vec<&str> = seed.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(seed.iter().all(|b| b.author == Author::new("John", "Doe")));
    }

    #[test]
    fn json_shape_uses_capitalized_field_names() {
        // ---
        let book = seed_books().remove(0);
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({
                "ID": "1",
                "Isbn": "9812005321",
                "Title": "Kubernetes Training",
                "Price": "32$",
                "Author": { "FirstName": "John", "LastName": "Doe" }
            })
        );
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        // ---
        let book: Book = serde_json::from_value(json!({ "Isbn": "42", "extra": "abc" })).unwrap();
        assert_eq!(book.isbn, "42");
        assert_eq!(book.title, "");
        assert_eq!(book.author, Author::default());
    }
}
