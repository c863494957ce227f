//! App shell for the damage triage client.
//!
//! The UI thread owns all view state; one backend worker thread owns a tokio
//! runtime and does the file reads, HTTP calls, and image decoding. The two
//! sides talk over bounded channels, and every backend event carries the
//! attempt token it was produced for.

use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use serde::{Deserialize, Serialize};

use assessment_client::{AssessmentClient, ImageUpload};
use shared::{
    catalog::PresentationCatalog,
    domain::AttemptId,
    protocol::{public_image_url, report_file_name, AssessmentReport, AssessmentResponse},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::progress::AnalysisProgress;

const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];
const LOADING_STEPS: [&str; 3] = [
    "Uploading image",
    "Running damage analysis",
    "Preparing report",
];

pub const SETTINGS_STORAGE_KEY: &str = "damage_triage_desktop_settings";

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedDesktopSettings {
    pub server_url: Option<String>,
}

/// Decoded RGBA pixels ready for texture upload.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Lifecycle of an asynchronously loaded image.
#[derive(Debug, Clone)]
enum ImageSlot {
    Loading,
    Ready(PreviewImage),
    Failed(String),
}

#[derive(Debug, Clone)]
struct SelectedFile {
    path: PathBuf,
    name: String,
    size_text: String,
    mime_type: String,
}

#[derive(Debug, Clone)]
struct DisplayedResult {
    level_label: String,
    badge_color: String,
    icon: String,
    title: String,
    description: String,
    recommendations: Vec<String>,
    confidence_fraction: f32,
    confidence_text: String,
}

/// The four-plus-one mutually exclusive view states. Idle and FileSelected
/// render the same upload card; Loading, Results, and Error add exactly one
/// section below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewState {
    Idle,
    FileSelected,
    Loading,
    Results,
    Error,
}

pub struct DamageTriageApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    catalog: PresentationCatalog,

    view_state: ViewState,
    selected: Option<SelectedFile>,
    preview: Option<ImageSlot>,
    preview_texture: Option<TextureHandle>,

    current_attempt: AttemptId,
    in_flight: bool,
    progress: AnalysisProgress,

    result: Option<DisplayedResult>,
    result_image: Option<ImageSlot>,
    result_texture: Option<TextureHandle>,

    error: Option<UiError>,
    status: String,
}

impl DamageTriageApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
        catalog: PresentationCatalog,
        persisted: Option<PersistedDesktopSettings>,
    ) -> Self {
        let server_url = persisted
            .and_then(|settings| settings.server_url)
            .unwrap_or(startup.server_url);
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            catalog,
            view_state: ViewState::Idle,
            selected: None,
            preview: None,
            preview_texture: None,
            current_attempt: AttemptId(0),
            in_flight: false,
            progress: AnalysisProgress::idle(),
            result: None,
            result_image: None,
            result_texture: None,
            error: None,
            status: "Ready".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(error) => {
                    self.show_error(error);
                }
                UiEvent::PreviewLoaded { attempt, image } => {
                    if attempt != self.current_attempt {
                        tracing::debug!(attempt = attempt.0, "dropping stale preview");
                        continue;
                    }
                    self.preview = Some(ImageSlot::Ready(image));
                    self.preview_texture = None;
                }
                UiEvent::PreviewFailed { attempt, reason } => {
                    if attempt != self.current_attempt {
                        continue;
                    }
                    // Non-fatal: the selection stays valid, only the thumbnail
                    // is replaced by a notice.
                    tracing::warn!(%reason, "preview decode failed");
                    self.preview = Some(ImageSlot::Failed(reason));
                    self.preview_texture = None;
                }
                UiEvent::AssessmentCompleted { attempt, outcome } => {
                    if attempt != self.current_attempt {
                        tracing::debug!(attempt = attempt.0, "dropping stale assessment completion");
                        continue;
                    }
                    self.in_flight = false;
                    self.progress.cancel();
                    match outcome {
                        Ok(response) => self.apply_assessment(response),
                        Err(error) => self.show_error(error),
                    }
                }
                UiEvent::ResultImageLoaded { attempt, image } => {
                    if attempt != self.current_attempt {
                        continue;
                    }
                    self.result_image = Some(ImageSlot::Ready(image));
                    self.result_texture = None;
                }
                UiEvent::ResultImageFailed { attempt, reason } => {
                    if attempt != self.current_attempt {
                        continue;
                    }
                    tracing::warn!(%reason, "result image unavailable");
                    self.result_image = Some(ImageSlot::Failed(reason));
                    self.result_texture = None;
                }
            }
        }
    }

    /// Intake from the file picker or a window drop. Validation happens here;
    /// an invalid file never reaches the backend.
    fn handle_picked_file(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let size_bytes = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                self.show_error(UiError::validation(format!(
                    "Could not read '{name}': {err}"
                )));
                return;
            }
        };
        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        if let Err(message) = validate_candidate(&mime_type, size_bytes) {
            self.show_error(UiError::validation(message));
            return;
        }

        // A new selection supersedes whatever was on screen, including an
        // outstanding request: bump the token so its completion lands stale.
        self.current_attempt.0 += 1;
        self.in_flight = false;
        self.progress.reset();
        self.result = None;
        self.result_image = None;
        self.result_texture = None;
        self.error = None;

        self.preview = Some(ImageSlot::Loading);
        self.preview_texture = None;
        self.selected = Some(SelectedFile {
            path: path.clone(),
            name: name.clone(),
            size_text: format_file_size(size_bytes),
            mime_type,
        });
        self.view_state = ViewState::FileSelected;
        self.status = format!("Selected {name}");

        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadPreview {
                attempt: self.current_attempt,
                path,
            },
            &mut self.status,
        );
    }

    fn submit_assessment(&mut self) {
        if self.in_flight {
            tracing::debug!("ignoring submit while an assessment is outstanding");
            return;
        }
        let Some(file) = self.selected.clone() else {
            self.show_error(UiError::validation("Please select an image file first."));
            return;
        };

        self.in_flight = true;
        self.error = None;
        self.result = None;
        self.result_image = None;
        self.result_texture = None;
        self.view_state = ViewState::Loading;
        self.progress.start(Instant::now());
        self.status = format!("Analyzing {}...", file.name);

        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitAssessment {
                attempt: self.current_attempt,
                path: file.path,
                filename: file.name,
                mime_type: file.mime_type,
                server_url: self.server_url.clone(),
            },
            &mut self.status,
        );
    }

    fn apply_assessment(&mut self, response: AssessmentResponse) {
        let presentation = self.catalog.lookup(response.damage_level);
        let confidence_text = format!("{}%", (response.confidence * 100.0).round() as i64);

        self.result = Some(DisplayedResult {
            level_label: presentation.label.clone(),
            badge_color: presentation.color.clone(),
            icon: presentation.icon.clone(),
            title: presentation.title.clone(),
            description: presentation.description.clone(),
            recommendations: presentation.recommendations.to_vec(),
            confidence_fraction: response.confidence,
            confidence_text,
        });

        let public_path = public_image_url(&response.image_path);
        if public_path.is_empty() {
            self.result_image = None;
        } else {
            self.result_image = Some(ImageSlot::Loading);
            self.result_texture = None;
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchResultImage {
                    attempt: self.current_attempt,
                    public_path,
                    server_url: self.server_url.clone(),
                },
                &mut self.status,
            );
        }

        self.view_state = ViewState::Results;
        self.status = "Assessment complete".to_string();
    }

    fn show_error(&mut self, error: UiError) {
        tracing::warn!(
            category = ?error.category(),
            message = %error.message(),
            "showing error view"
        );
        self.progress.cancel();
        self.error = Some(error);
        self.view_state = ViewState::Error;
    }

    fn reset_form(&mut self) {
        self.selected = None;
        self.preview = None;
        self.preview_texture = None;
        self.result = None;
        self.result_image = None;
        self.result_texture = None;
        self.error = None;
        self.progress.reset();
        self.in_flight = false;
        // Any straggler response from the abandoned attempt lands stale.
        self.current_attempt.0 += 1;
        self.view_state = ViewState::Idle;
        self.status = "Ready".to_string();
    }

    fn current_report(&self, timestamp: chrono::DateTime<Utc>) -> Option<AssessmentReport> {
        let result = self.result.as_ref()?;
        Some(AssessmentReport {
            timestamp,
            damage_level: result.level_label.clone(),
            confidence: result.confidence_text.clone(),
            recommendations: result.recommendations.clone(),
        })
    }

    fn export_report(&mut self) {
        let now = Utc::now();
        let Some(report) = self.current_report(now) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(report_file_name(now))
            .save_file()
        else {
            return;
        };
        let serialized = match serde_json::to_string_pretty(&report) {
            Ok(serialized) => serialized,
            Err(err) => {
                self.show_error(UiError::new(
                    UiErrorCategory::Unknown,
                    format!("Could not serialize report: {err}"),
                ));
                return;
            }
        };
        match fs::write(&path, serialized) {
            Ok(()) => self.status = format!("Report saved to {}", path.display()),
            Err(err) => self.show_error(UiError::new(
                UiErrorCategory::Unknown,
                format!("Could not save report: {err}"),
            )),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let mut dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        if dropped.len() > 1 {
            tracing::debug!(count = dropped.len(), "multiple files dropped; using the first");
        }
        let first = dropped.remove(0);
        if let Some(path) = first.path {
            self.handle_picked_file(path);
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading("Vehicle Damage Triage");
        ui.label("Upload a photo of the damage to get an instant AI assessment.");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Assessment service:");
            ui.add(
                egui::TextEdit::singleline(&mut self.server_url)
                    .desired_width(280.0)
                    .hint_text("http://127.0.0.1:8080"),
            );
        });
        ui.add_space(8.0);
    }

    fn show_upload_card(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label("Drop a vehicle photo anywhere in this window, or");
                if ui.button("Choose Image...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", &["jpg", "jpeg", "png"])
                        .pick_file()
                    {
                        self.handle_picked_file(path);
                    }
                }
            });
            ui.weak("JPEG or PNG, up to 10 MB.");

            let Some(file) = self.selected.clone() else {
                return;
            };
            ui.separator();
            ui.horizontal(|ui| {
                ui.strong(&file.name);
                ui.weak(&file.size_text);
            });

            match self.preview.clone() {
                Some(ImageSlot::Loading) => {
                    ui.add(egui::Spinner::new());
                }
                Some(ImageSlot::Ready(image)) => {
                    let texture = Self::texture_for(
                        ui.ctx(),
                        &mut self.preview_texture,
                        "file-preview",
                        &image,
                    );
                    let size = fit_size(image.width, image.height, egui::vec2(360.0, 240.0));
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(size));
                }
                Some(ImageSlot::Failed(reason)) => {
                    ui.weak(format!("Preview unavailable: {reason}"));
                }
                None => {}
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let analyze = ui.add_enabled(
                    !self.in_flight,
                    egui::Button::new("Analyze Damage"),
                );
                if analyze.clicked() {
                    self.submit_assessment();
                }
                if ui.button("Clear").clicked() {
                    self.reset_form();
                }
            });
        });
    }

    fn show_loading_section(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Analyzing damage");
            ui.add(egui::ProgressBar::new(self.progress.fraction()).show_percentage());
            ui.add_space(4.0);
            for (index, step_label) in LOADING_STEPS.iter().enumerate() {
                if self.progress.step_active(index) {
                    ui.colored_label(
                        egui::Color32::from_rgb(0x45, 0xB7, 0xD1),
                        format!("✔ {step_label}"),
                    );
                } else {
                    ui.weak(format!("• {step_label}"));
                }
            }
        });
    }

    fn show_results_section(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.result.clone() else {
            return;
        };
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Assessment results");
            ui.add_space(6.0);

            match self.result_image.clone() {
                Some(ImageSlot::Loading) => {
                    ui.add(egui::Spinner::new());
                }
                Some(ImageSlot::Ready(image)) => {
                    let texture = Self::texture_for(
                        ui.ctx(),
                        &mut self.result_texture,
                        "result-image",
                        &image,
                    );
                    let size = fit_size(image.width, image.height, egui::vec2(460.0, 320.0));
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(size));
                }
                Some(ImageSlot::Failed(reason)) => {
                    ui.weak(format!("Result image unavailable: {reason}"));
                }
                None => {}
            }

            ui.add_space(6.0);
            let badge_color =
                parse_hex_color(&result.badge_color).unwrap_or(egui::Color32::GRAY);
            egui::Frame::new()
                .fill(badge_color)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::symmetric(10, 4))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", result.icon, result.level_label))
                            .color(egui::Color32::WHITE)
                            .strong(),
                    );
                });
            ui.add_space(4.0);
            ui.strong(&result.title);
            ui.label(&result.description);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Confidence:");
                ui.strong(&result.confidence_text);
            });
            ui.add(
                egui::ProgressBar::new(result.confidence_fraction)
                    .fill(badge_color)
                    .desired_width(280.0),
            );

            ui.add_space(6.0);
            ui.strong("Recommended next steps");
            for recommendation in &result.recommendations {
                ui.horizontal(|ui| {
                    ui.label("✔");
                    ui.label(recommendation);
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Download Report").clicked() {
                    self.export_report();
                }
                if ui.button("Assess Another Vehicle").clicked() {
                    self.reset_form();
                }
            });
        });
    }

    fn show_error_section(&mut self, ui: &mut egui::Ui) {
        let message = self
            .error
            .as_ref()
            .map(|error| error.message().to_string())
            .unwrap_or_default();
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Something went wrong");
            ui.colored_label(egui::Color32::from_rgb(0xFF, 0x6B, 0x6B), message);
            ui.add_space(6.0);
            if ui.button("Start Over").clicked() {
                self.reset_form();
            }
        });
    }

    fn texture_for(
        ctx: &egui::Context,
        cache: &mut Option<TextureHandle>,
        name: &str,
        image: &PreviewImage,
    ) -> TextureHandle {
        if let Some(texture) = cache {
            return texture.clone();
        }
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
        let texture = ctx.load_texture(name.to_string(), color_image, egui::TextureOptions::LINEAR);
        *cache = Some(texture.clone());
        texture
    }
}

impl eframe::App for DamageTriageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);
        if self.view_state == ViewState::Loading {
            self.progress.tick(Instant::now());
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.show_header(ui);
                    self.show_upload_card(ui);
                    match self.view_state {
                        ViewState::Idle | ViewState::FileSelected => {}
                        ViewState::Loading => self.show_loading_section(ui),
                        ViewState::Results => self.show_results_section(ui),
                        ViewState::Error => self.show_error_section(ui),
                    }
                });
        });

        if self.view_state == ViewState::Loading {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDesktopSettings {
            server_url: Some(self.server_url.clone()),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

fn validate_candidate(mime_type: &str, size_bytes: u64) -> Result<(), &'static str> {
    if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
        return Err("Please select a valid image file (JPEG, PNG).");
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err("File size must be less than 10MB.");
    }
    Ok(())
}

/// Binary-unit size string with up to two decimals, trailing zeros trimmed:
/// 0 -> "0 Bytes", 1536 -> "1.5 KB", 1048576 -> "1 MB".
fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).log(1024.0).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[exponent])
}

fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(egui::Color32::from_rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

fn fit_size(width: usize, height: usize, max: egui::Vec2) -> egui::Vec2 {
    let (w, h) = (width as f32, height as f32);
    if w <= 0.0 || h <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (max.x / w).min(max.y / h).min(1.0);
    egui::vec2(w * scale, h * scale)
}

fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic.thumbnail(1024, 1024).to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

async fn load_preview(path: &Path) -> anyhow::Result<PreviewImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read '{}'", path.display()))?;
    decode_preview_image(&bytes)
        .map_err(anyhow::Error::msg)
        .context("could not decode image")
}

async fn fetch_result_image(
    client: &AssessmentClient,
    public_path: &str,
) -> anyhow::Result<PreviewImage> {
    let bytes = client
        .fetch_result_image(public_path)
        .await
        .context("could not download result image")?;
    decode_preview_image(&bytes)
        .map_err(anyhow::Error::msg)
        .context("could not decode result image")
}

/// Reuses the HTTP client across commands; rebuilds it when the UI points at
/// a different server.
fn client_for<'a>(
    slot: &'a mut Option<AssessmentClient>,
    server_url: &str,
) -> &'a AssessmentClient {
    let trimmed = server_url.trim_end_matches('/');
    let reuse = matches!(slot.as_ref(), Some(client) if client.base_url() == trimmed);
    if !reuse {
        *slot = Some(AssessmentClient::new(server_url));
    }
    slot.get_or_insert_with(|| AssessmentClient::new(server_url))
}

pub fn start_backend_bridge(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            let mut client_slot: Option<AssessmentClient> = None;

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadPreview { attempt, path } => {
                        let event = match load_preview(&path).await {
                            Ok(image) => UiEvent::PreviewLoaded { attempt, image },
                            Err(err) => UiEvent::PreviewFailed {
                                attempt,
                                reason: format!("{err:#}"),
                            },
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    BackendCommand::SubmitAssessment {
                        attempt,
                        path,
                        filename,
                        mime_type,
                        server_url,
                    } => {
                        let client = client_for(&mut client_slot, &server_url);
                        let outcome = match tokio::fs::read(&path).await {
                            Ok(bytes) => client
                                .assess(ImageUpload {
                                    filename,
                                    mime_type,
                                    bytes,
                                })
                                .await
                                .map_err(|err| {
                                    tracing::error!("assessment request failed: {err}");
                                    UiError::from_client_error(&err)
                                }),
                            Err(err) => Err(UiError::request_failure(format!(
                                "could not read '{}': {err}",
                                path.display()
                            ))),
                        };
                        let _ = ui_tx.try_send(UiEvent::AssessmentCompleted { attempt, outcome });
                    }
                    BackendCommand::FetchResultImage {
                        attempt,
                        public_path,
                        server_url,
                    } => {
                        let client = client_for(&mut client_slot, &server_url);
                        let event = match fetch_result_image(client, &public_path).await {
                            Ok(image) => UiEvent::ResultImageLoaded { attempt, image },
                            Err(err) => UiEvent::ResultImageFailed {
                                attempt,
                                reason: format!("{err:#}"),
                            },
                        };
                        let _ = ui_tx.try_send(event);
                    }
                }
            }
        });
    });
}
