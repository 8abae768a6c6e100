//! Application state and navigation logic.

use std::time::Instant;

use crate::client::{ClientHandle, ClientResponse, ResponseFeed};
use crate::data::{SoftCache, VitalSeries, VitalsReading, VitalsReport};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Risk gauge, narrative summary, and vitals chart.
    Dashboard,
    /// Manual entry form and batch paste line.
    Submit,
    /// Chronological table of fetched samples.
    History,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Submit,
            View::Submit => View::History,
            View::History => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::History,
            View::Submit => View::Dashboard,
            View::History => View::Submit,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Submit => "Submit",
            View::History => "History",
        }
    }
}

/// Lifecycle of one network operation.
///
/// Owned explicitly by the app, one per operation, rather than as an
/// ambient boolean, so the view can always tell which outcome it is
/// looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

/// Which submit-form line has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    HeartRate,
    BloodOxygen,
    Temperature,
    Batch,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::HeartRate => FormField::BloodOxygen,
            FormField::BloodOxygen => FormField::Temperature,
            FormField::Temperature => FormField::Batch,
            FormField::Batch => FormField::HeartRate,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::HeartRate => FormField::Batch,
            FormField::BloodOxygen => FormField::HeartRate,
            FormField::Temperature => FormField::BloodOxygen,
            FormField::Batch => FormField::Temperature,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::HeartRate => "Heart Rate (bpm)",
            FormField::BloodOxygen => "Blood Oxygen (%)",
            FormField::Temperature => "Temperature (°C)",
            FormField::Batch => "Batch (JSON array)",
        }
    }
}

/// Text state of the submit form.
#[derive(Debug, Default)]
pub struct SubmitForm {
    pub heart_rate: String,
    pub blood_oxygen: String,
    pub temperature: String,
    pub batch: String,
    pub focus: FormField,
}

impl SubmitForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::HeartRate => &self.heart_rate,
            FormField::BloodOxygen => &self.blood_oxygen,
            FormField::Temperature => &self.temperature,
            FormField::Batch => &self.batch,
        }
    }

    /// The text buffer of the focused field.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::HeartRate => &mut self.heart_rate,
            FormField::BloodOxygen => &mut self.blood_oxygen,
            FormField::Temperature => &mut self.temperature,
            FormField::Batch => &mut self.batch,
        }
    }

    /// Parse the three numeric fields into a reading.
    ///
    /// Every field must parse as a finite float; the error names the first
    /// field that does not.
    pub fn parse_reading(&self) -> Result<VitalsReading, String> {
        let heart_rate = parse_finite(&self.heart_rate, "heart rate")?;
        let blood_oxygen = parse_finite(&self.blood_oxygen, "blood oxygen")?;
        let temperature = parse_finite(&self.temperature, "temperature")?;
        Ok(VitalsReading { heart_rate, blood_oxygen, temperature, timestamp: None })
    }

    /// Clear the numeric fields after a successful submit. The batch line
    /// is cleared separately on batch success.
    pub fn clear_values(&mut self) {
        self.heart_rate.clear();
        self.blood_oxygen.clear();
        self.temperature.clear();
    }
}

fn parse_finite(text: &str, name: &str) -> Result<f64, String> {
    let value: f64 =
        text.trim().parse().map_err(|_| format!("{} is not a number: {:?}", name, text.trim()))?;
    if !value.is_finite() {
        return Err(format!("{} must be finite", name));
    }
    Ok(value)
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Client worker endpoints
    client: ClientHandle,
    responses: ResponseFeed,
    pub months_back: u32,

    // The held report and its derived chart series
    pub report: Option<VitalsReport>,
    pub series: Option<VitalSeries>,
    /// True while the display is seeded from the soft cache rather than a
    /// live fetch.
    pub showing_cached: bool,

    // Request lifecycle, one per operation
    pub fetch_state: RequestState,
    pub submit_state: RequestState,
    pub last_error: Option<String>,

    // Sequence numbers of the newest issued request of each kind; older
    // responses are discarded on intake.
    fetch_seq: u64,
    submit_seq: u64,

    // Submit form
    pub form: SubmitForm,

    // Navigation state
    pub history_index: usize,
    pub summary_scroll: u16,

    // UI
    pub theme: Theme,
    status_message: Option<(String, Instant)>,

    cache: Option<SoftCache>,
}

impl App {
    /// Create a new App wired to a client worker.
    ///
    /// If a cache is given and holds a usable seed, the display starts
    /// from it; the seed carries no risk score, so no classification is
    /// rendered until the first live fetch.
    pub fn new(
        client: ClientHandle,
        responses: ResponseFeed,
        months_back: u32,
        cache: Option<SoftCache>,
    ) -> Self {
        let mut app = Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            client,
            responses,
            months_back,
            report: None,
            series: None,
            showing_cached: false,
            fetch_state: RequestState::Idle,
            submit_state: RequestState::Idle,
            last_error: None,
            fetch_seq: 0,
            submit_seq: 0,
            form: SubmitForm::default(),
            history_index: 0,
            summary_scroll: 0,
            theme: Theme::auto_detect(),
            status_message: None,
            cache,
        };

        if let Some(seed) = app.cache.as_ref().and_then(|c| c.load()) {
            app.install_report(seed);
            app.showing_cached = true;
        }

        app
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Dispatch a fetch of the latest report.
    ///
    /// Allowed while an earlier fetch is still in flight; the earlier
    /// response becomes stale and is discarded on intake.
    pub fn start_fetch(&mut self) {
        self.fetch_seq += 1;
        self.fetch_state = RequestState::Loading;
        self.client.fetch(self.fetch_seq, self.months_back);
    }

    /// Validate the form and dispatch a single-reading submit.
    pub fn start_submit(&mut self) {
        match self.form.parse_reading() {
            Ok(reading) => {
                self.submit_seq += 1;
                self.submit_state = RequestState::Loading;
                self.client.submit(self.submit_seq, reading);
            }
            Err(message) => self.set_status_message(message),
        }
    }

    /// Dispatch the batch line as raw text.
    ///
    /// The text is parsed by the client before any network call; malformed
    /// input comes back as a failed submit without traffic.
    pub fn start_submit_batch(&mut self) {
        let raw = self.form.batch.trim().to_string();
        if raw.is_empty() {
            self.set_status_message("paste a JSON array of readings first".to_string());
            return;
        }
        self.submit_seq += 1;
        self.submit_state = RequestState::Loading;
        self.client.submit_batch(self.submit_seq, raw);
    }

    /// Drain worker responses into app state.
    ///
    /// Responses whose sequence number is older than the newest issued
    /// request of their kind are discarded, so a slow superseded call can
    /// never overwrite newer state. Returns true if anything changed.
    pub fn pump_responses(&mut self) -> bool {
        let mut changed = false;

        while let Some(response) = self.responses.poll() {
            match response {
                ClientResponse::Fetched { seq, outcome } => {
                    if seq != self.fetch_seq {
                        continue; // superseded
                    }
                    changed = true;
                    match outcome {
                        Ok(report) => {
                            self.fetch_state = RequestState::Succeeded;
                            self.last_error = None;
                            if let Some(cache) = &self.cache {
                                if let Err(e) = cache.store(&report) {
                                    tracing::warn!(error = %e, "cache write failed");
                                }
                            }
                            self.install_report(report);
                            self.showing_cached = false;
                        }
                        Err(e) => {
                            // The prior report stays on screen untouched
                            self.fetch_state = RequestState::Failed;
                            self.last_error = Some(e.to_string());
                            self.set_status_message("Error fetching vitals".to_string());
                        }
                    }
                }
                ClientResponse::Submitted { seq, outcome } => {
                    if seq != self.submit_seq {
                        continue;
                    }
                    changed = true;
                    match outcome {
                        Ok(count) => {
                            self.submit_state = RequestState::Succeeded;
                            self.last_error = None;
                            if count == 1 {
                                self.form.clear_values();
                                self.set_status_message("Vitals published".to_string());
                            } else {
                                self.form.batch.clear();
                                self.set_status_message(format!("Published {} readings", count));
                            }
                        }
                        Err(e) => {
                            self.submit_state = RequestState::Failed;
                            self.last_error = Some(e.to_string());
                            self.set_status_message("Error publishing vitals".to_string());
                        }
                    }
                }
            }
        }

        changed
    }

    /// Replace the held report wholesale and rebuild derived state.
    fn install_report(&mut self, report: VitalsReport) {
        self.series = VitalSeries::build(&report.vitals_history);
        self.history_index =
            self.history_index.min(report.vitals_history.len().saturating_sub(1));
        self.summary_scroll = 0;
        self.report = Some(report);
    }

    /// Number of samples in the held report.
    pub fn sample_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.vitals_history.len())
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move the history selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.sample_count().saturating_sub(1);
        self.history_index = (self.history_index + n).min(max);
    }

    /// Move the history selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.history_index = self.history_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.history_index = 0;
    }

    pub fn select_last(&mut self) {
        self.history_index = self.sample_count().saturating_sub(1);
    }

    /// Scroll the summary panel.
    pub fn scroll_summary(&mut self, delta: i16) {
        self.summary_scroll = self.summary_scroll.saturating_add_signed(delta);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::worker::{ClientCommand, ClientHandle, ClientResponse, ResponseFeed};
    use crate::client::ClientError;
    use crate::data::VitalsSample;
    use chrono::{TimeZone, Utc};
    use tokio::sync::mpsc;

    /// An App wired to bare channels, with the worker ends exposed.
    fn harness() -> (
        App,
        mpsc::UnboundedReceiver<ClientCommand>,
        mpsc::UnboundedSender<ClientResponse>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let app = App::new(ClientHandle::new(cmd_tx), ResponseFeed::new(resp_rx), 3, None);
        (app, cmd_rx, resp_tx)
    }

    fn report(score: Option<f64>) -> VitalsReport {
        VitalsReport {
            vitals_history: vec![VitalsSample {
                timestamp: Utc.with_ymd_and_hms(2025, 4, 12, 8, 0, 0).unwrap(),
                heart_rate: 72.0,
                blood_oxygen: 97.5,
                temperature: 36.8,
            }],
            risk_score: score,
            summary: Some("stable overnight".to_string()),
        }
    }

    fn fetch_error() -> ClientError {
        ClientError::EnvelopeDecode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    #[test]
    fn test_fetch_success_installs_report_and_series() {
        let (mut app, mut cmds, resp_tx) = harness();

        app.start_fetch();
        assert!(app.fetch_state.is_loading());
        assert!(matches!(cmds.try_recv().unwrap(), ClientCommand::Fetch { seq: 1, .. }));

        resp_tx.send(ClientResponse::Fetched { seq: 1, outcome: Ok(report(Some(0.5))) }).unwrap();
        assert!(app.pump_responses());

        assert_eq!(app.fetch_state, RequestState::Succeeded);
        assert_eq!(app.sample_count(), 1);
        assert_eq!(app.series.as_ref().unwrap().len(), 1);
        assert!(!app.showing_cached);
    }

    #[test]
    fn test_failed_fetch_leaves_prior_report_untouched() {
        let (mut app, _cmds, resp_tx) = harness();

        app.start_fetch();
        resp_tx.send(ClientResponse::Fetched { seq: 1, outcome: Ok(report(Some(0.5))) }).unwrap();
        app.pump_responses();

        app.start_fetch();
        resp_tx.send(ClientResponse::Fetched { seq: 2, outcome: Err(fetch_error()) }).unwrap();
        app.pump_responses();

        assert_eq!(app.fetch_state, RequestState::Failed);
        assert!(app.last_error.is_some());
        // The earlier report is still held
        assert_eq!(app.report.as_ref().unwrap().risk_score, Some(0.5));
        assert_eq!(app.sample_count(), 1);
    }

    #[test]
    fn test_stale_fetch_response_is_discarded() {
        let (mut app, _cmds, resp_tx) = harness();

        app.start_fetch(); // seq 1
        app.start_fetch(); // seq 2 supersedes it

        // The slow first response arrives after the second was issued
        resp_tx.send(ClientResponse::Fetched { seq: 1, outcome: Ok(report(Some(0.9))) }).unwrap();
        assert!(!app.pump_responses());
        assert!(app.report.is_none());
        assert!(app.fetch_state.is_loading());

        resp_tx.send(ClientResponse::Fetched { seq: 2, outcome: Ok(report(Some(0.2))) }).unwrap();
        assert!(app.pump_responses());
        assert_eq!(app.report.as_ref().unwrap().risk_score, Some(0.2));
    }

    #[test]
    fn test_submit_requires_parsable_form() {
        let (mut app, mut cmds, _resp_tx) = harness();

        app.form.heart_rate = "not a number".to_string();
        app.form.blood_oxygen = "97.5".to_string();
        app.form.temperature = "36.8".to_string();
        app.start_submit();

        assert_eq!(app.submit_state, RequestState::Idle);
        assert!(cmds.try_recv().is_err());
        assert!(app.get_status_message().unwrap().contains("heart rate"));
    }

    #[test]
    fn test_submit_success_clears_form() {
        let (mut app, mut cmds, resp_tx) = harness();

        app.form.heart_rate = "72".to_string();
        app.form.blood_oxygen = "97.5".to_string();
        app.form.temperature = "36.8".to_string();
        app.start_submit();

        match cmds.try_recv().unwrap() {
            ClientCommand::Submit { seq, reading } => {
                assert_eq!(seq, 1);
                assert_eq!(reading.heart_rate, 72.0);
                assert!(reading.timestamp.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        resp_tx.send(ClientResponse::Submitted { seq: 1, outcome: Ok(1) }).unwrap();
        app.pump_responses();

        assert_eq!(app.submit_state, RequestState::Succeeded);
        assert!(app.form.heart_rate.is_empty());
    }

    #[test]
    fn test_empty_batch_line_is_not_dispatched() {
        let (mut app, mut cmds, _resp_tx) = harness();
        app.start_submit_batch();
        assert!(cmds.try_recv().is_err());
        assert_eq!(app.submit_state, RequestState::Idle);
    }

    #[test]
    fn test_batch_success_clears_batch_line() {
        let (mut app, mut cmds, resp_tx) = harness();

        app.form.batch = r#"[{"heart_rate":71,"blood_oxygen":96,"temperature":36.6}]"#.to_string();
        app.start_submit_batch();
        assert!(matches!(cmds.try_recv().unwrap(), ClientCommand::SubmitBatch { seq: 1, .. }));

        resp_tx.send(ClientResponse::Submitted { seq: 1, outcome: Ok(3) }).unwrap();
        app.pump_responses();

        assert!(app.form.batch.is_empty());
        assert!(app.get_status_message().unwrap().contains("3"));
    }

    #[test]
    fn test_view_cycle() {
        let (mut app, _cmds, _resp_tx) = harness();
        assert_eq!(app.current_view, View::Dashboard);
        app.next_view();
        assert_eq!(app.current_view, View::Submit);
        app.next_view();
        assert_eq!(app.current_view, View::History);
        app.next_view();
        assert_eq!(app.current_view, View::Dashboard);
        app.prev_view();
        assert_eq!(app.current_view, View::History);
    }

    #[test]
    fn test_history_selection_clamps() {
        let (mut app, _cmds, resp_tx) = harness();
        app.start_fetch();
        resp_tx.send(ClientResponse::Fetched { seq: 1, outcome: Ok(report(None)) }).unwrap();
        app.pump_responses();

        app.select_next_n(10);
        assert_eq!(app.history_index, 0); // single sample
        app.select_prev_n(10);
        assert_eq!(app.history_index, 0);
    }
}
