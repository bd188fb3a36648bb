use std::sync::LazyLock;

use regex::Regex;
use vitrine_dom::{ElementId, EventStatus, Page, PageEvent};

use crate::effect::{Effect, EffectContext};

const FORMS: &str = "form[data-validate]";
const REQUIRED: &str = "[required]";
const INVALID: &str = "is-invalid";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Korean domestic numbering: area or carrier code, exchange, line.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2,3}-?[0-9]{3,4}-?[0-9]{4}$").expect("valid phone pattern")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Validate the required fields of `form`, marking failures with `is-invalid`.
///
/// Required fields must be non-blank after trimming. Required email and
/// telephone inputs must also match their pattern. Optional fields are never
/// checked. Returns whether the form as a whole is valid.
pub fn validate(page: &mut dyn Page, form: ElementId) -> bool {
    let mut valid = true;
    for field in page.query_within(form, REQUIRED) {
        let raw = page.value(field);
        let value = raw.trim();

        let mut field_valid = !value.is_empty();
        if field_valid {
            match page.attr(field, "type").as_deref() {
                Some("email") => field_valid &= is_valid_email(value),
                Some("tel") => field_valid &= is_valid_phone(value),
                _ => {}
            }
        }

        if field_valid {
            page.remove_class(field, INVALID);
        } else {
            page.add_class(field, INVALID);
            valid = false;
        }
    }
    valid
}

/// Blocks submission of opted-in forms with invalid fields.
#[derive(Debug, Default)]
pub struct FormValidation {
    forms: Vec<ElementId>,
}

impl FormValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forms(&self) -> &[ElementId] {
        &self.forms
    }
}

impl Effect for FormValidation {
    fn name(&self) -> &'static str {
        "form_validation"
    }

    fn init(&mut self, cx: &mut EffectContext<'_>) {
        self.forms = cx.page.query_all(FORMS);
        tracing::debug!("validating {} forms", self.forms.len());
    }

    fn handle_event(&mut self, cx: &mut EffectContext<'_>, event: &PageEvent) -> EventStatus {
        let PageEvent::Submit { form } = *event else {
            return EventStatus::ignored();
        };
        if !self.forms.contains(&form) {
            return EventStatus::ignored();
        }
        if validate(cx.page, form) {
            EventStatus::handled()
        } else {
            tracing::trace!("blocked submission of {}", form);
            EventStatus::prevent_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine_dom::MemoryPage;

    use super::*;
    use crate::testing::Harness;

    struct ContactForm {
        page: MemoryPage,
        form: ElementId,
        name: ElementId,
        email: ElementId,
        phone: ElementId,
    }

    fn contact_form() -> ContactForm {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let form = page.spawn(body, "form").attr("data-validate", "").finish();
        let name = page.spawn(form, "input").attr("required", "").finish();
        let email = page
            .spawn(form, "input")
            .attr("type", "email")
            .attr("required", "")
            .finish();
        let phone = page
            .spawn(form, "input")
            .attr("type", "tel")
            .attr("required", "")
            .finish();
        ContactForm {
            page,
            form,
            name,
            email,
            phone,
        }
    }

    #[test]
    fn test_patterns() {
        assert!(!is_valid_email("a@b"));
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(is_valid_phone("010-1234-5678"));
        assert!(is_valid_phone("0212345678"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn test_empty_required_field_is_invalid() {
        let mut f = contact_form();
        f.page.set_value(f.phone, "010-1234-5678");
        f.page.set_value(f.email, "kim@example.com");
        f.page.set_value(f.name, "   ");
        assert!(!validate(&mut f.page, f.form));
        assert!(f.page.has_class(f.name, "is-invalid"));
        assert!(!f.page.has_class(f.phone, "is-invalid"));
        assert!(!f.page.has_class(f.email, "is-invalid"));

        f.page.set_value(f.name, "Kim");
        assert!(validate(&mut f.page, f.form));
        assert!(!f.page.has_class(f.name, "is-invalid"));
    }

    #[test]
    fn test_malformed_email_and_phone() {
        let mut f = contact_form();
        f.page.set_value(f.name, "Kim");
        f.page.set_value(f.email, "a@b");
        f.page.set_value(f.phone, "12345");
        assert!(!validate(&mut f.page, f.form));
        assert!(f.page.has_class(f.email, "is-invalid"));
        assert!(f.page.has_class(f.phone, "is-invalid"));

        f.page.set_value(f.email, " a@b.com ");
        f.page.set_value(f.phone, "010-1234-5678");
        assert!(validate(&mut f.page, f.form));
    }

    #[test]
    fn test_submit_blocked_until_valid() {
        let f = contact_form();
        let (form, name, email, phone) = (f.form, f.name, f.email, f.phone);
        let mut h = Harness::new(f.page);
        let mut effect = FormValidation::new();
        effect.init(&mut h.cx());
        assert_eq!(effect.forms(), &[form]);

        let status = effect.handle_event(&mut h.cx(), &PageEvent::Submit { form });
        assert!(status.is_default_prevented());

        h.page.set_value(name, "Kim");
        h.page.set_value(email, "kim@example.com");
        h.page.set_value(phone, "010-1234-5678");
        let status = effect.handle_event(&mut h.cx(), &PageEvent::Submit { form });
        assert!(status.is_handled() && !status.is_default_prevented());
    }

    #[test]
    fn test_optional_fields_are_not_checked() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let form = page.spawn(body, "form").attr("data-validate", "").finish();
        let name = page.spawn(form, "input").attr("required", "").finish();
        let email = page.spawn(form, "input").attr("type", "email").finish();
        let phone = page.spawn(form, "input").attr("type", "tel").finish();
        page.set_value(name, "Kim");
        page.set_value(email, "a@b");
        page.set_value(phone, "12345");

        let mut h = Harness::new(page);
        let mut effect = FormValidation::new();
        effect.init(&mut h.cx());
        let status = effect.handle_event(&mut h.cx(), &PageEvent::Submit { form });
        assert!(!status.is_default_prevented());
        assert!(!h.page.has_class(email, "is-invalid"));
        assert!(!h.page.has_class(phone, "is-invalid"));
    }

    #[test]
    fn test_forms_without_opt_in_are_ignored() {
        let mut page = MemoryPage::new();
        let body = page.body().unwrap();
        let form = page.spawn(body, "form").finish();
        page.spawn(form, "input").attr("required", "");
        let mut h = Harness::new(page);
        let mut effect = FormValidation::new();
        effect.init(&mut h.cx());
        let status = effect.handle_event(&mut h.cx(), &PageEvent::Submit { form });
        assert_eq!(status, EventStatus::ignored());
    }
}
