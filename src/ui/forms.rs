use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::bridge::FileBinding;
use crate::models::{FileMetadata, StudentRecord};

/// Fields available within the student form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum StudentField {
    #[default]
    FirstName,
    LastName,
    Phone,
    Email,
}

impl StudentField {
    pub(crate) const ALL: [StudentField; 4] = [
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::Phone,
        StudentField::Email,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StudentField::FirstName => "First name",
            StudentField::LastName => "Last name",
            StudentField::Phone => "Phone",
            StudentField::Email => "Email",
        }
    }

    fn index(self) -> usize {
        match self {
            StudentField::FirstName => 0,
            StudentField::LastName => 1,
            StudentField::Phone => 2,
            StudentField::Email => 3,
        }
    }
}

/// Internal representation of the student form. Values are kept exactly as
/// typed; trimming and validation happen when the roster commits them.
#[derive(Default, Clone, Debug)]
pub(crate) struct StudentForm {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) phone: String,
    pub(crate) email: String,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

impl StudentForm {
    /// Populate the form from an existing record when editing.
    pub(crate) fn from_record(record: &StudentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            active: StudentField::FirstName,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % StudentField::ALL.len();
        self.active = StudentField::ALL[next];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = StudentField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = StudentField::ALL[previous];
    }

    fn value(&self, field: StudentField) -> &String {
        match field {
            StudentField::FirstName => &self.first_name,
            StudentField::LastName => &self.last_name,
            StudentField::Phone => &self.phone,
            StudentField::Email => &self.email,
        }
    }

    fn value_mut(&mut self, field: StudentField) -> &mut String {
        match field {
            StudentField::FirstName => &mut self.first_name,
            StudentField::LastName => &mut self.last_name,
            StudentField::Phone => &mut self.phone,
            StudentField::Email => &mut self.email,
        }
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    pub(crate) fn to_record(&self) -> StudentRecord {
        StudentRecord::new(&self.first_name, &self.last_name, &self.phone, &self.email)
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: StudentField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: StudentField) -> usize {
        self.value(field).chars().count()
    }
}

/// State for confirming a permanent delete.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmStudentDelete {
    pub(crate) index: usize,
    pub(crate) name: String,
}

/// Why the file prompt is open.
#[derive(Clone, Debug)]
pub(crate) enum PromptPurpose {
    Select,
    /// Looking for the file used in a previous session.
    Restore(FileMetadata),
}

/// Path prompt standing in for a file picker.
#[derive(Clone, Debug)]
pub(crate) struct FilePrompt {
    pub(crate) input: String,
    pub(crate) purpose: PromptPurpose,
    pub(crate) error: Option<String>,
}

impl FilePrompt {
    pub(crate) fn select() -> Self {
        Self {
            input: String::new(),
            purpose: PromptPurpose::Select,
            error: None,
        }
    }

    pub(crate) fn restore(stored: FileMetadata) -> Self {
        Self {
            input: String::new(),
            purpose: PromptPurpose::Restore(stored),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn title(&self) -> String {
        match &self.purpose {
            PromptPurpose::Select => "Select Spreadsheet".to_string(),
            PromptPurpose::Restore(stored) => format!("Locate {}", stored.name),
        }
    }
}

/// What to do once write access has been settled.
#[derive(Clone, Debug)]
pub(crate) enum AfterGrant {
    /// Finish binding a newly selected file.
    Load(FileBinding),
    /// Save to the file that is already bound.
    Save,
}

/// Ask before lifting the read-only flag on a spreadsheet.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmWriteAccess {
    pub(crate) name: String,
    pub(crate) then: AfterGrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        let mut form = StudentForm::default();
        form.previous_field();
        assert_eq!(form.active, StudentField::Email);
        form.next_field();
        assert_eq!(form.active, StudentField::FirstName);
        form.next_field();
        assert_eq!(form.active, StudentField::LastName);
    }

    #[test]
    fn typing_targets_the_active_field() {
        let mut form = StudentForm::default();
        form.active = StudentField::Phone;
        assert!(form.push_char('5'));
        assert!(!form.push_char('\n'));
        form.push_char('5');
        form.backspace();
        assert_eq!(form.phone, "5");
        assert!(form.first_name.is_empty());
        assert_eq!(form.value_len(StudentField::Phone), 1);
    }

    #[test]
    fn from_record_round_trips_to_record() {
        let record = StudentRecord::new("Ada", "Lovelace", "5551234567", "ada@example.com");
        assert_eq!(StudentForm::from_record(&record).to_record(), record);
    }

    #[test]
    fn prompt_title_names_the_remembered_file() {
        let prompt = FilePrompt::restore(FileMetadata {
            name: "roster.xlsx".into(),
            id: "x".into(),
            last_modified: 0,
        });
        assert_eq!(prompt.title(), "Locate roster.xlsx");
        assert_eq!(FilePrompt::select().title(), "Select Spreadsheet");
    }
}
