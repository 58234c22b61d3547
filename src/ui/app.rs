use std::mem;

use chrono::Local;
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::bridge::{self, candidates_from_selection, rebind, Access, FileBinding};
use crate::db::{clear_binding_metadata, fetch_binding_metadata, store_binding_metadata};
use crate::error::BridgeError;
use crate::models::FileMetadata;
use crate::roster::{RosterError, RosterStore};

use super::forms::{
    AfterGrant, ConfirmStudentDelete, ConfirmWriteAccess, FilePrompt, PromptPurpose, StudentField,
    StudentForm,
};
use super::helpers::{centered_rect, clock_time, display_cells, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header space showing which file is bound.
const HEADER_HEIGHT: u16 = 3;
/// Column titles for the roster table.
const COLUMN_TITLES: [&str; 4] = ["First Name", "Last Name", "Phone", "Email"];

/// Fine-grained modes. The edit cursor lives inside `EditingStudent`, so it
/// cannot outlive the form that uses it.
enum Mode {
    Normal,
    AddingStudent(StudentForm),
    EditingStudent { index: usize, form: StudentForm },
    ConfirmDelete(ConfirmStudentDelete),
    SelectingFile(FilePrompt),
    ConfirmWriteAccess(ConfirmWriteAccess),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Which file actions are currently offered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub save_enabled: bool,
    pub file_select_visible: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            save_enabled: false,
            file_select_visible: true,
        }
    }
}

/// Central application state: the roster, the bound spreadsheet, and the
/// session store that remembers it.
pub struct App {
    conn: Connection,
    roster: RosterStore,
    binding: Option<FileBinding>,
    selected: usize,
    controls: Controls,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            roster: RosterStore::new(),
            binding: None,
            selected: 0,
            controls: Controls::default(),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn binding(&self) -> Option<&FileBinding> {
        self.binding.as_ref()
    }

    pub fn status(&self) -> Option<(&str, StatusKind)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.kind))
    }

    /// Decide the opening screen: try to find the previously used file, or
    /// ask for one.
    pub fn start(&mut self) {
        match fetch_binding_metadata(&self.conn) {
            Ok(Some(stored)) => {
                self.set_status(
                    format!(
                        "Enter the folder or path of {} to continue where you left off (Esc to skip).",
                        stored.name
                    ),
                    StatusKind::Info,
                );
                self.mode = Mode::SelectingFile(FilePrompt::restore(stored));
            }
            Ok(None) => {
                self.set_status("Please select your spreadsheet file", StatusKind::Info);
            }
            Err(err) => {
                error!(error = %err, "could not restore file binding");
                if let Err(err) = clear_binding_metadata(&self.conn) {
                    warn!(error = %surface_error(&err), "could not drop cached file metadata");
                }
                self.set_status("Could not restore previous file", StatusKind::Error);
            }
        }
    }

    /// Route a key press to the active mode. Returns `true` when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingStudent(form) => self.handle_student_form(code, None, form),
            Mode::EditingStudent { index, form } => {
                self.handle_student_form(code, Some(index), form)
            }
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::SelectingFile(prompt) => self.handle_file_prompt(code, prompt),
            Mode::ConfirmWriteAccess(confirm) => self.handle_confirm_write_access(code, confirm),
        };

        exit
    }

    /// Ctrl+S saves from the roster view without leaving the keyboard's home row.
    pub(crate) fn handle_ctrl_s(&mut self) {
        if matches!(self.mode, Mode::Normal) {
            self.mode = self.request_save();
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.roster.len().saturating_sub(1),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Mode::AddingStudent(StudentForm::default());
            }
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(record) = self.roster.get(self.selected) {
                    let form = StudentForm::from_record(record);
                    let message = format!("Editing student: {}", record.full_name());
                    self.set_status(message, StatusKind::Info);
                    return Mode::EditingStudent {
                        index: self.selected,
                        form,
                    };
                }
                self.set_status("No student selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(record) = self.roster.get(self.selected) {
                    let confirm = ConfirmStudentDelete {
                        index: self.selected,
                        name: record.full_name(),
                    };
                    self.clear_status();
                    return Mode::ConfirmDelete(confirm);
                }
                self.set_status("No student selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if self.controls.file_select_visible {
                    return Mode::SelectingFile(FilePrompt::select());
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => return self.request_save(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.open_externally(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_student_form(
        &mut self,
        code: KeyCode,
        editing: Option<usize>,
        mut form: StudentForm,
    ) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let message = if editing.is_some() {
                    "Edit cancelled."
                } else {
                    "Add student cancelled."
                };
                self.set_status(message, StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.commit_student(editing, &form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = err.to_string();
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        match (keep_open, editing) {
            (false, _) => Mode::Normal,
            (true, Some(index)) => Mode::EditingStudent { index, form },
            (true, None) => Mode::AddingStudent(form),
        }
    }

    fn commit_student(
        &mut self,
        editing: Option<usize>,
        form: &StudentForm,
    ) -> Result<(), RosterError> {
        let record = form.to_record();
        match editing {
            Some(index) => {
                self.roster.update(index, record)?;
                self.selected = index;
                self.set_status("Student updated successfully", StatusKind::Success);
            }
            None => {
                self.roster.add(record)?;
                self.selected = self.roster.len() - 1;
                self.set_status("Student added successfully", StatusKind::Success);
            }
        }
        Ok(())
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmStudentDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.roster.delete(confirm.index) {
                    Ok(removed) => {
                        self.clamp_selection();
                        self.set_status(
                            format!(
                                "Deleted student: {} (remember to save)",
                                removed.full_name()
                            ),
                            StatusKind::Error,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_file_prompt(&mut self, code: KeyCode, mut prompt: FilePrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                match prompt.purpose {
                    PromptPurpose::Select => {
                        self.set_status(BridgeError::SelectionCancelled.to_string(), StatusKind::Error)
                    }
                    PromptPurpose::Restore(_) => {
                        self.set_status("Please select your spreadsheet file", StatusKind::Info)
                    }
                }
                Mode::Normal
            }
            KeyCode::Backspace => {
                prompt.backspace();
                Mode::SelectingFile(prompt)
            }
            KeyCode::Char(ch) => {
                if prompt.push_char(ch) {
                    prompt.error = None;
                }
                Mode::SelectingFile(prompt)
            }
            KeyCode::Enter => {
                if prompt.input.trim().is_empty() {
                    prompt.error = Some("Enter a file or folder path.".to_string());
                    return Mode::SelectingFile(prompt);
                }
                match self.resolve_prompt(&prompt) {
                    Ok(binding) => self.adopt(binding),
                    Err(BridgeError::NotFound { name }) => {
                        warn!(file = %name, "previous file not found in selection");
                        self.set_status("Could not restore previous file", StatusKind::Error);
                        Mode::Normal
                    }
                    Err(err) => {
                        let message = err.to_string();
                        prompt.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                        Mode::SelectingFile(prompt)
                    }
                }
            }
            _ => Mode::SelectingFile(prompt),
        }
    }

    fn resolve_prompt(&self, prompt: &FilePrompt) -> Result<FileBinding, BridgeError> {
        let candidates = candidates_from_selection(&prompt.input)?;
        match &prompt.purpose {
            PromptPurpose::Restore(stored) => rebind(stored, &candidates),
            PromptPurpose::Select => match candidates.as_slice() {
                [single] => FileBinding::open(single),
                _ => Err(BridgeError::Selection {
                    path: prompt.input.trim().into(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("{} spreadsheets found, pick one", candidates.len()),
                    ),
                }),
            },
        }
    }

    /// Remember a freshly chosen file, then make sure it is writable before
    /// loading it.
    fn adopt(&mut self, binding: FileBinding) -> Mode {
        self.remember(binding.metadata());
        match binding.query_access() {
            Access::Granted => {
                self.open_binding(binding);
                Mode::Normal
            }
            Access::Prompt => Mode::ConfirmWriteAccess(ConfirmWriteAccess {
                name: binding.name().to_string(),
                then: AfterGrant::Load(binding),
            }),
            Access::Denied => {
                self.refuse_binding(binding.name());
                Mode::Normal
            }
        }
    }

    fn open_binding(&mut self, binding: FileBinding) {
        match bridge::load(&binding) {
            Ok(records) => {
                let count = records.len();
                self.roster.replace_all(records);
                self.selected = 0;
                self.controls.save_enabled = true;
                self.controls.file_select_visible = false;
                self.set_status(
                    format!("Working with: {} ({count} students loaded)", binding.name()),
                    StatusKind::Success,
                );
                self.binding = Some(binding);
            }
            Err(err) => {
                error!(error = %err, "load error");
                self.set_status("Error loading file", StatusKind::Error);
            }
        }
    }

    fn refuse_binding(&mut self, name: &str) {
        warn!(file = %name, "write access not granted");
        self.set_status(
            format!("Need write permissions to work with {name}"),
            StatusKind::Error,
        );
    }

    fn handle_confirm_write_access(&mut self, code: KeyCode, confirm: ConfirmWriteAccess) -> Mode {
        let granted = match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => false,
            _ => return Mode::ConfirmWriteAccess(confirm),
        };

        match confirm.then {
            AfterGrant::Load(binding) => {
                if granted && binding.request_access() == Access::Granted {
                    self.open_binding(binding);
                } else {
                    self.refuse_binding(&confirm.name);
                }
            }
            AfterGrant::Save => {
                let allowed = granted
                    && self
                        .binding
                        .as_ref()
                        .map(|binding| binding.request_access() == Access::Granted)
                        .unwrap_or(false);
                if allowed {
                    self.perform_save();
                } else {
                    self.permission_failure();
                }
            }
        }
        Mode::Normal
    }

    fn request_save(&mut self) -> Mode {
        if !self.controls.save_enabled {
            self.set_status("Select a spreadsheet before saving.", StatusKind::Error);
            return Mode::Normal;
        }
        let Some(binding) = self.binding.as_ref() else {
            self.set_status("Select a spreadsheet before saving.", StatusKind::Error);
            return Mode::Normal;
        };

        match binding.query_access() {
            Access::Granted => self.perform_save(),
            Access::Prompt => {
                return Mode::ConfirmWriteAccess(ConfirmWriteAccess {
                    name: binding.name().to_string(),
                    then: AfterGrant::Save,
                })
            }
            Access::Denied => self.permission_failure(),
        }
        Mode::Normal
    }

    fn perform_save(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        let count = self.roster.len();

        match bridge::save(binding, self.roster.list()) {
            Ok(metadata) => {
                self.remember(&metadata);
                info!(file = %metadata.name, count, "save complete");
                self.set_status(
                    format!(
                        "Saved {count} students to {} at {}",
                        metadata.name,
                        clock_time(Local::now())
                    ),
                    StatusKind::Success,
                );
            }
            Err(err) if err.is_permission_error() => self.permission_failure(),
            Err(err) => {
                error!(error = %err, "save error");
                self.set_status(format!("Error saving file: {err}"), StatusKind::Error);
            }
        }
    }

    /// The file stopped accepting writes: keep save available for a retry and
    /// offer picking a file again.
    fn permission_failure(&mut self) {
        warn!("save aborted without write permission");
        self.controls.save_enabled = true;
        self.controls.file_select_visible = true;
        self.set_status("Need write permissions to save", StatusKind::Error);
    }

    fn remember(&self, metadata: &FileMetadata) {
        if let Err(err) = store_binding_metadata(&self.conn, metadata) {
            warn!(error = %surface_error(&err), "could not cache file metadata");
        }
    }

    fn open_externally(&mut self) {
        let Some(binding) = self.binding.as_ref() else {
            self.set_status("No spreadsheet selected.", StatusKind::Error);
            return;
        };
        let name = binding.name().to_string();
        if let Err(err) = open_path(binding.path()) {
            self.set_status(format!("Failed to open {name}: {err}"), StatusKind::Error);
        } else {
            self.set_status(format!("Opened {name}."), StatusKind::Info);
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.roster.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.roster.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.roster.len() {
            self.selected = self.roster.len().saturating_sub(1);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_roster(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::AddingStudent(form) => self.draw_student_form(frame, area, "Add Student", form),
            Mode::EditingStudent { form, .. } => {
                self.draw_student_form(frame, area, "Update Student", form)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::SelectingFile(prompt) => self.draw_file_prompt(frame, area, prompt),
            Mode::ConfirmWriteAccess(confirm) => {
                self.draw_confirm_write_access(frame, area, confirm)
            }
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.binding {
            Some(binding) => Line::from(vec![
                Span::raw("Spreadsheet: "),
                Span::styled(
                    binding.path().display().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                "No spreadsheet selected",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let block = Block::default().borders(Borders::ALL).title("Student Roster");
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn draw_roster(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Students ({})", self.roster.len()));

        if self.roster.is_empty() {
            let message = Paragraph::new("No students found")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(COLUMN_TITLES.iter().map(|title| Cell::from(*title)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self
            .roster
            .list()
            .iter()
            .map(|record| Row::new(display_cells(record)));
        let widths = [
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Select   "),
            Span::styled("[+]", key_style),
            Span::raw(" Add   "),
            Span::styled("[e]", key_style),
            Span::raw(" Edit   "),
            Span::styled("[-]", key_style),
            Span::raw(" Delete   "),
        ];
        if self.controls.file_select_visible {
            spans.push(Span::styled("[o]", key_style));
            spans.push(Span::raw(" Select File   "));
        }
        if self.controls.save_enabled {
            spans.push(Span::styled("[s]", key_style));
            spans.push(Span::raw(" Save   "));
            spans.push(Span::styled("[x]", key_style));
            spans.push(Span::raw(" Open in App   "));
        }
        spans.push(Span::styled("[q]", key_style));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &StudentForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = StudentField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = StudentField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let prefix = format!("{}: ", form.active.label()).len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmStudentDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Delete Student")
            .borders(Borders::ALL);
        let lines = vec![
            Line::from(format!("Delete {} permanently?", confirm.name)),
            Line::from(""),
            Line::from(Span::styled(
                "y/Enter to delete • n/Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_file_prompt(&self, frame: &mut Frame, area: Rect, prompt: &FilePrompt) {
        let popup_area = centered_rect(70, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(prompt.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let hint = match &prompt.purpose {
            PromptPurpose::Select => "Path to an .xlsx file or a folder holding one",
            PromptPurpose::Restore(_) => "Folder or path where the previous file lives",
        };
        let mut lines = vec![
            Line::from(format!("Path: {}", prompt.input)),
            Line::from(""),
        ];
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{hint} • Enter to open • Esc to cancel"),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        frame.set_cursor_position((
            inner.x + "Path: ".len() as u16 + prompt.input.chars().count() as u16,
            inner.y,
        ));
    }

    fn draw_confirm_write_access(
        &self,
        frame: &mut Frame,
        area: Rect,
        confirm: &ConfirmWriteAccess,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Write Access")
            .borders(Borders::ALL);
        let lines = vec![
            Line::from(format!("{} is read-only.", confirm.name)),
            Line::from("Grant write access so changes can be saved?"),
            Line::from(""),
            Line::from(Span::styled(
                "y/Enter to allow • n/Esc to refuse",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}
