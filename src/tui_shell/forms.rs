//! Minimal line-edit form: labeled fields, one focused at a time.

#[derive(Debug)]
pub(super) struct FormField {
    pub(super) label: &'static str,
    pub(super) value: String,
    pub(super) masked: bool,
}

impl FormField {
    pub(super) fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub(super) fn with_value(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            masked: false,
        }
    }

    pub(super) fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }

    pub(super) fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Form {
    pub(super) fields: Vec<FormField>,
    pub(super) focus: usize,
}

impl Form {
    pub(super) fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub(super) fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub(super) fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub(super) fn insert_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub(super) fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub(super) fn value(&self, index: usize) -> &str {
        self.fields[index].value.trim()
    }

    pub(super) fn clear_values(&mut self) {
        for f in &mut self.fields {
            f.value.clear();
        }
        self.focus = 0;
    }
}
