use serde::Deserialize;

pub const ALLOWED_RATINGS: &[&str] = &["G", "PG", "PG-13", "R"];

pub const NOTES_MAX_CHARS: usize = 25;

pub const MSG_CATEGORY_REQUIRED: &str = "Category is required.";
pub const MSG_TITLE_REQUIRED: &str = "Title is required.";
pub const MSG_YEAR_REQUIRED: &str = "Year is required.";
pub const MSG_YEAR_RANGE: &str = "Year must be between 1900 and 2100.";
pub const MSG_DIRECTOR_REQUIRED: &str = "Director is required.";
pub const MSG_RATING_REQUIRED: &str = "Rating is required.";
pub const MSG_RATING_INVALID: &str = "Rating must be G, PG, PG-13, or R.";
pub const MSG_NOTES_TOO_LONG: &str = "Notes cannot exceed 25 characters.";

/// A movie submission exactly as posted: every field a raw string so a
/// failed submission can be re-rendered with the user's input intact.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub edited: Option<String>,
    #[serde(default)]
    pub lent_to: String,
    #[serde(default)]
    pub notes: String,
}

/// A validated movie ready to be appended to the store. `id` is absent on
/// purpose; the store assigns it on insert.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub category: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub rating: String,
    pub edited: bool,
    pub lent_to: Option<String>,
    pub notes: Option<String>,
}

/// Field name -> violation messages, in field declaration order. A field is
/// present only when it has at least one message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    fields: Vec<(&'static str, Vec<&'static str>)>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field; empty slice when the field is clean.
    pub fn field(&self, name: &str) -> &[&'static str] {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &[&'static str])> {
        self.fields.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field, vec![message])),
        }
    }
}

impl MovieForm {
    pub fn is_edited(&self) -> bool {
        matches!(self.edited.as_deref(), Some("true") | Some("on"))
    }

    /// Applies every rule independently and collects all violations. Returns
    /// the parsed record only when no field failed.
    pub fn validate(&self) -> Result<NewMovie, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.category.is_empty() {
            errors.push("category", MSG_CATEGORY_REQUIRED);
        }
        if self.title.is_empty() {
            errors.push("title", MSG_TITLE_REQUIRED);
        }

        let year = if self.year.is_empty() {
            errors.push("year", MSG_YEAR_REQUIRED);
            None
        } else {
            match self.year.parse::<i32>() {
                Ok(year) if (1900..=2100).contains(&year) => Some(year),
                _ => {
                    errors.push("year", MSG_YEAR_RANGE);
                    None
                }
            }
        };

        if self.director.is_empty() {
            errors.push("director", MSG_DIRECTOR_REQUIRED);
        }

        if self.rating.is_empty() {
            errors.push("rating", MSG_RATING_REQUIRED);
        } else if !ALLOWED_RATINGS.contains(&self.rating.as_str()) {
            errors.push("rating", MSG_RATING_INVALID);
        }

        if self.notes.chars().count() > NOTES_MAX_CHARS {
            errors.push("notes", MSG_NOTES_TOO_LONG);
        }

        match (errors.is_empty(), year) {
            (true, Some(year)) => Ok(NewMovie {
                category: self.category.clone(),
                title: self.title.clone(),
                year,
                director: self.director.clone(),
                rating: self.rating.clone(),
                edited: self.is_edited(),
                lent_to: none_if_empty(&self.lent_to),
                notes: none_if_empty(&self.notes),
            }),
            _ => Err(errors),
        }
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> MovieForm {
        MovieForm {
            category: "Drama".to_string(),
            title: "Arrival".to_string(),
            year: "2016".to_string(),
            director: "Denis Villeneuve".to_string(),
            rating: "PG-13".to_string(),
            ..MovieForm::default()
        }
    }

    #[test]
    fn valid_form_produces_new_movie() {
        let movie = valid_form().validate().expect("form should validate");
        assert_eq!(movie.category, "Drama");
        assert_eq!(movie.title, "Arrival");
        assert_eq!(movie.year, 2016);
        assert_eq!(movie.director, "Denis Villeneuve");
        assert_eq!(movie.rating, "PG-13");
        assert!(!movie.edited);
        assert_eq!(movie.lent_to, None);
        assert_eq!(movie.notes, None);
    }

    #[test]
    fn missing_required_fields_flag_exactly_those_fields() {
        let form = MovieForm { title: String::new(), ..valid_form() };
        let errors = form.validate().expect_err("empty title should fail");
        assert_eq!(errors.field("title"), &[MSG_TITLE_REQUIRED]);
        assert!(errors.field("category").is_empty());
        assert!(errors.field("year").is_empty());
        assert!(errors.field("director").is_empty());
        assert!(errors.field("rating").is_empty());
        assert!(errors.field("notes").is_empty());
    }

    #[test]
    fn all_violations_are_collected_in_declaration_order() {
        let errors = MovieForm::default().validate().expect_err("blank form should fail");
        let fields: Vec<&str> = errors.fields().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["category", "title", "year", "director", "rating"]);
    }

    #[test]
    fn year_boundaries_are_inclusive() {
        for year in ["1900", "2100", "1955"] {
            let form = MovieForm { year: year.to_string(), ..valid_form() };
            assert!(form.validate().is_ok(), "year {year} should be accepted");
        }
        for year in ["1899", "2101", "0", "-5"] {
            let form = MovieForm { year: year.to_string(), ..valid_form() };
            let errors = form.validate().expect_err("out-of-range year should fail");
            assert_eq!(errors.field("year"), &[MSG_YEAR_RANGE]);
        }
    }

    #[test]
    fn missing_year_gets_the_required_message() {
        let form = MovieForm { year: String::new(), ..valid_form() };
        let errors = form.validate().expect_err("missing year should fail");
        assert_eq!(errors.field("year"), &[MSG_YEAR_REQUIRED]);
    }

    #[test]
    fn non_numeric_year_gets_the_range_message() {
        let form = MovieForm { year: "next year".to_string(), ..valid_form() };
        let errors = form.validate().expect_err("non-numeric year should fail");
        assert_eq!(errors.field("year"), &[MSG_YEAR_RANGE]);
    }

    #[test]
    fn rating_must_match_the_allowed_set_exactly() {
        for rating in ALLOWED_RATINGS {
            let form = MovieForm { rating: rating.to_string(), ..valid_form() };
            assert!(form.validate().is_ok(), "rating {rating} should be accepted");
        }
        for rating in ["pg", "NC-17", "PG13", "r"] {
            let form = MovieForm { rating: rating.to_string(), ..valid_form() };
            let errors = form.validate().expect_err("bad rating should fail");
            assert_eq!(errors.field("rating"), &[MSG_RATING_INVALID]);
        }
        let form = MovieForm { rating: String::new(), ..valid_form() };
        let errors = form.validate().expect_err("empty rating should fail");
        assert_eq!(errors.field("rating"), &[MSG_RATING_REQUIRED]);
    }

    #[test]
    fn notes_length_is_capped_at_25_chars() {
        let form = MovieForm { notes: "a".repeat(25), ..valid_form() };
        let movie = form.validate().expect("25-char notes should pass");
        assert_eq!(movie.notes.as_deref(), Some("aaaaaaaaaaaaaaaaaaaaaaaaa"));

        let form = MovieForm { notes: "a".repeat(26), ..valid_form() };
        let errors = form.validate().expect_err("26-char notes should fail");
        assert_eq!(errors.field("notes"), &[MSG_NOTES_TOO_LONG]);
    }

    #[test]
    fn optional_fields_are_stored_when_present() {
        let form = MovieForm {
            edited: Some("true".to_string()),
            lent_to: "Marcus".to_string(),
            notes: "extended cut".to_string(),
            ..valid_form()
        };
        let movie = form.validate().expect("form should validate");
        assert!(movie.edited);
        assert_eq!(movie.lent_to.as_deref(), Some("Marcus"));
        assert_eq!(movie.notes.as_deref(), Some("extended cut"));
    }
}
