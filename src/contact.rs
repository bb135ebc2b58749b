//! Contact form model and its hand-off.
//!
//! The site never sends anything itself. A submission is either posted to a
//! configured endpoint or turned into a `mailto:` link addressed to the
//! content's contact email.

use crate::config::ContactConfig;
use crate::content::Contact;

/// A form field as rendered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
}

pub const FIELDS: [Field; 5] = [
    Field {
        name: "name",
        label: "Full name",
        required: true,
    },
    Field {
        name: "email",
        label: "Email",
        required: true,
    },
    Field {
        name: "project_type",
        label: "Project type",
        required: false,
    },
    Field {
        name: "subject",
        label: "Subject",
        required: true,
    },
    Field {
        name: "message",
        label: "Message",
        required: true,
    },
];

/// Where a submitted form goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormHandoff {
    /// POST to a form-processing endpoint.
    Endpoint(String),
    /// Compose an email in the visitor's mail client.
    Mailto(String),
}

impl FormHandoff {
    /// The configured endpoint wins; otherwise mail the content's address.
    pub fn resolve(config: &ContactConfig, contact: &Contact) -> Self {
        match &config.form_action {
            Some(url) => FormHandoff::Endpoint(url.clone()),
            None => FormHandoff::Mailto(contact.email.clone()),
        }
    }

    /// `(action, enctype)` for the `<form>` element.
    pub fn form_target(&self) -> (String, Option<&'static str>) {
        match self {
            FormHandoff::Endpoint(url) => (url.clone(), None),
            FormHandoff::Mailto(email) => (format!("mailto:{email}"), Some("text/plain")),
        }
    }
}

/// One filled-in submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "project_type" => &self.project_type,
            "subject" => &self.subject,
            "message" => &self.message,
            _ => "",
        }
    }

    /// Names of required fields that are blank, in form order.
    pub fn missing(&self) -> Vec<&'static str> {
        FIELDS
            .iter()
            .filter(|f| f.required && self.value(f.name).trim().is_empty())
            .map(|f| f.name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty() && self.email.contains('@')
    }

    /// A `mailto:` URL carrying the submission as subject and body.
    pub fn mailto_href(&self, to: &str) -> String {
        let mut body = String::new();
        if !self.name.is_empty() {
            body.push_str(&format!("{} <{}>\n", self.name, self.email));
        }
        if !self.project_type.is_empty() {
            body.push_str(&format!("Project type: {}\n", self.project_type));
        }
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&self.message);
        format!(
            "mailto:{to}?subject={}&body={}",
            percent_encode(&self.subject),
            percent_encode(&body)
        )
    }
}

/// RFC 3986 percent-encoding of everything outside the unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
