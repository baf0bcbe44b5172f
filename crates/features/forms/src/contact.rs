use chrono::NaiveDate;
use csync_domain::ContactStatus;
use typed_builder::TypedBuilder;

/// Fixed contact attributes collected by the creation form.
///
/// Everything except `email` is optional; blank strings count as absent.
///
/// ```rust
/// use csync_forms::CoreFields;
///
/// let core = CoreFields::builder().email("ada@example.com").first_name("Ada").build();
/// assert_eq!(core.first_name, "Ada");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, TypedBuilder)]
pub struct CoreFields {
    #[builder(setter(into))]
    pub email: String,
    #[builder(default)]
    pub status: ContactStatus,
    #[builder(default, setter(into))]
    pub prefix: String,
    #[builder(default, setter(into))]
    pub first_name: String,
    #[builder(default, setter(into))]
    pub last_name: String,
    #[builder(default, setter(into))]
    pub phone: String,
    #[builder(default, setter(strip_option))]
    pub date_of_birth: Option<NaiveDate>,
    #[builder(default, setter(into))]
    pub address_line_1: String,
    #[builder(default, setter(into))]
    pub address_line_2: String,
    #[builder(default, setter(into))]
    pub city: String,
    #[builder(default, setter(into))]
    pub state: String,
    #[builder(default, setter(into))]
    pub postal_code: String,
    #[builder(default, setter(into))]
    pub country: String,
}
