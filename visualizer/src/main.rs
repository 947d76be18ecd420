use iced::{
    time,
    widget::{
        button, column, pick_list, progress_bar, row, scrollable, slider, text, text_input, Column,
        Container, Row,
    },
    Alignment, Element, Length, Subscription, Task, Theme,
};
use ipincore::math::EntropySource;
use ipincore::pipeline::{PipelineController, PipelineTimings, RunKind, SystemClock};
use ipincore::render::{render_placeholder, ChartKind, ChartRenderer, DrawList};
use ipincore::scenario::{RenderedCard, RenderedGrid, ScenarioId, ScenarioPresenter};
use ipincore::synthetic::subband::{MAX_BANDS, MIN_BANDS};
use ipincore::synthetic::{
    Dataset, DatasetKind, GenerationParams, LesrMode, SyntheticDataProvider, MAX_USERS, MIN_USERS,
};
use replay::chart_canvas;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

mod replay;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "I-PIN Demo".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    if state.pipeline.is_running() {
        time::every(Duration::from_millis(50)).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

const USER_CHOICES: [usize; MAX_USERS - MIN_USERS + 1] = [3, 4, 5, 6, 7, 8, 9, 10];
const THRESHOLDS: [Threshold; 3] = [Threshold(0.3), Threshold(0.5), Threshold(0.7)];
const SAMPLES: [u32; 3] = [1, 2, 3];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Threshold(f32);

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "threshold {:.1}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Visualizations,
    Gallery,
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineView {
    Raw,
    Preprocessed,
    Lesr,
    Features,
}

impl PipelineView {
    const ALL: [PipelineView; 4] = [
        PipelineView::Raw,
        PipelineView::Preprocessed,
        PipelineView::Lesr,
        PipelineView::Features,
    ];

    fn title(self) -> &'static str {
        match self {
            PipelineView::Raw => "Raw audio waveform",
            PipelineView::Preprocessed => "Preprocessed audio",
            PipelineView::Lesr => "LESR feature processing",
            PipelineView::Features => "Final feature vector",
        }
    }
}

impl fmt::Display for PipelineView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DisplayType {
    Waveform,
    Spectrogram,
    Features,
}

impl DisplayType {
    const ALL: [DisplayType; 3] = [
        DisplayType::Waveform,
        DisplayType::Spectrogram,
        DisplayType::Features,
    ];

    fn chart(self) -> ChartKind {
        match self {
            DisplayType::Waveform => ChartKind::Waveform,
            DisplayType::Spectrogram => ChartKind::Spectrogram,
            DisplayType::Features => ChartKind::FeatureMap,
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisplayType::Waveform => "Waveform",
            DisplayType::Spectrogram => "Spectrogram",
            DisplayType::Features => "Feature map",
        };
        f.write_str(label)
    }
}

struct VisualizationCharts {
    clusters: DrawList,
    sub_bands: DrawList,
    snr: DrawList,
    roc: DrawList,
    performance: DrawList,
    pipeline: DrawList,
}

struct GalleryCharts {
    grid: RenderedGrid,
    ablation: DrawList,
    threshold: DrawList,
    mofn: DrawList,
    band_sweep: DrawList,
    band_snr: DrawList,
}

struct DemoCharts {
    lesr: DrawList,
    features: DrawList,
    spectrogram: DrawList,
}

struct Visualizer {
    page: Page,
    renderer: Arc<ChartRenderer>,
    provider: SyntheticDataProvider,
    paint_rng: EntropySource,
    params: GenerationParams,
    lesr_mode: LesrMode,
    threshold: Threshold,
    perf_scenario: ScenarioId,
    pipeline_view: PipelineView,
    display: DisplayType,
    presenter: ScenarioPresenter,
    pipeline: PipelineController<SystemClock>,
    upload_path: String,
    notice: Option<String>,
    viz: VisualizationCharts,
    gallery: GalleryCharts,
    demo: DemoCharts,
}

#[derive(Debug, Clone)]
enum Message {
    PageSelected(Page),
    UsersSelected(usize),
    RegenerateClusters,
    BandsChanged(u32),
    LesrModeSelected(LesrMode),
    ThresholdSelected(Threshold),
    PerfScenarioSelected(ScenarioId),
    PipelineViewSelected(PipelineView),
    DisplaySelected(DisplayType),
    ScenarioTab(ScenarioId),
    SampleRequested(u32),
    PathChanged(String),
    ProcessRequested,
    FileLoaded(Result<Arc<Vec<u8>>, String>),
    ReprocessRequested,
    Tick,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let renderer = Arc::new(ChartRenderer::new());
        let blank = || DrawList::new(1.0, 1.0);
        let mut state = Visualizer {
            page: Page::Visualizations,
            renderer: Arc::clone(&renderer),
            provider: SyntheticDataProvider::new(Box::new(EntropySource::new())),
            paint_rng: EntropySource::new(),
            params: GenerationParams::default(),
            lesr_mode: LesrMode::default(),
            threshold: THRESHOLDS[1],
            perf_scenario: ScenarioId::default(),
            pipeline_view: PipelineView::Raw,
            display: DisplayType::Waveform,
            presenter: ScenarioPresenter::new(renderer),
            pipeline: PipelineController::new(
                SystemClock::new(),
                Box::new(EntropySource::new()),
                PipelineTimings::default(),
            ),
            upload_path: String::new(),
            notice: None,
            viz: VisualizationCharts {
                clusters: blank(),
                sub_bands: blank(),
                snr: blank(),
                roc: blank(),
                performance: blank(),
                pipeline: blank(),
            },
            gallery: GalleryCharts {
                grid: RenderedGrid::empty(),
                ablation: blank(),
                threshold: blank(),
                mofn: blank(),
                band_sweep: blank(),
                band_snr: blank(),
            },
            demo: DemoCharts {
                lesr: blank(),
                features: blank(),
                spectrogram: blank(),
            },
        };
        state.redraw_visualizations();
        state.redraw_gallery();
        state.redraw_demo();
        (state, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::PageSelected(page) => state.page = page,
            Message::UsersSelected(count) => {
                state.params = GenerationParams::new(count, state.params.band_count);
                state.viz.clusters = state.chart(ChartKind::Clusters);
            }
            Message::RegenerateClusters => {
                state.provider.invalidate(DatasetKind::Clusters);
                state.viz.clusters = state.chart(ChartKind::Clusters);
            }
            Message::BandsChanged(bands) => {
                state.params = GenerationParams::new(state.params.user_count, bands as usize);
                state.redraw_bands();
            }
            Message::LesrModeSelected(mode) => {
                state.lesr_mode = mode;
                state.viz.sub_bands = state.chart(ChartKind::SubBands(mode));
            }
            Message::ThresholdSelected(threshold) => {
                state.threshold = threshold;
                state.redraw_performance();
            }
            Message::PerfScenarioSelected(scenario) => {
                state.perf_scenario = scenario;
                state.redraw_performance();
            }
            Message::PipelineViewSelected(view) => {
                state.pipeline_view = view;
                state.viz.pipeline = state.chart(state.display.chart());
            }
            Message::DisplaySelected(display) => {
                state.display = display;
                state.viz.pipeline = state.chart(display.chart());
            }
            Message::ScenarioTab(scenario) => {
                state.gallery.grid = state.presenter.select(scenario.key(), &mut state.paint_rng);
            }
            Message::SampleRequested(sample) => {
                state.notice = None;
                state.pipeline.load_sample(sample);
                state.redraw_demo();
            }
            Message::PathChanged(path) => state.upload_path = path,
            Message::ProcessRequested => {
                let path = state.upload_path.trim().to_string();
                if path.is_empty() {
                    state.notice = Some("Choose a WAV file first".into());
                    return Task::none();
                }
                return Task::perform(read_audio(path), Message::FileLoaded);
            }
            Message::FileLoaded(Ok(bytes)) => {
                state.notice = state.pipeline.process_file(&bytes).err().map(|e| e.to_string());
                state.redraw_demo();
            }
            Message::FileLoaded(Err(err)) => {
                log::warn!("{}", err);
                state.notice = Some(format!("Audio processing failed: {err}"));
            }
            Message::ReprocessRequested => {
                state.notice = state.pipeline.reprocess().err().map(|e| e.to_string());
                state.redraw_demo();
            }
            Message::Tick => {
                if !state.pipeline.poll().is_empty() {
                    state.redraw_demo();
                }
            }
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let nav = row![
            nav_button("Visualizations", Page::Visualizations, state.page),
            nav_button("Gallery", Page::Gallery, state.page),
            nav_button("Demo", Page::Demo, state.page),
        ]
        .spacing(8);

        let page = match state.page {
            Page::Visualizations => state.visualizations_view(),
            Page::Gallery => state.gallery_view(),
            Page::Demo => state.demo_view(),
        };

        let layout = column![nav, scrollable(page).height(Length::Fill)]
            .spacing(16)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn visualizations_view(&self) -> Element<'_, Message> {
        let cluster_controls = row![
            text("Users").size(14),
            pick_list(
                &USER_CHOICES[..],
                Some(self.params.user_count),
                Message::UsersSelected
            ),
            button("Regenerate").on_press(Message::RegenerateClusters),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let band_controls = row![
            text(format!("SWT bands: {}", self.params.band_count)).size(14),
            slider(
                MIN_BANDS as u32..=MAX_BANDS as u32,
                self.params.band_count as u32,
                Message::BandsChanged
            )
            .width(Length::Fixed(240.0)),
            pick_list(
                &LesrMode::ALL[..],
                Some(self.lesr_mode),
                Message::LesrModeSelected
            ),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let performance_controls = row![
            pick_list(&THRESHOLDS[..], Some(self.threshold), Message::ThresholdSelected),
            pick_list(
                &ScenarioId::ALL[..],
                Some(self.perf_scenario),
                Message::PerfScenarioSelected
            ),
        ]
        .spacing(10);

        let pipeline_controls = row![
            pick_list(
                &PipelineView::ALL[..],
                Some(self.pipeline_view),
                Message::PipelineViewSelected
            ),
            pick_list(
                &DisplayType::ALL[..],
                Some(self.display),
                Message::DisplaySelected
            ),
        ]
        .spacing(10);

        column![
            text("User clusters (t-SNE)").size(24),
            cluster_controls,
            chart_canvas(&self.viz.clusters),
            text(self.lesr_mode.title()).size(24),
            band_controls,
            chart_canvas(&self.viz.sub_bands),
            chart_canvas(&self.viz.snr),
            text("Performance").size(24),
            performance_controls,
            chart_canvas(&self.viz.roc),
            chart_canvas(&self.viz.performance),
            text(self.pipeline_view.title()).size(24),
            pipeline_controls,
            chart_canvas(&self.viz.pipeline),
        ]
        .spacing(12)
        .into()
    }

    fn gallery_view(&self) -> Element<'_, Message> {
        let tabs = ScenarioId::ALL
            .iter()
            .fold(Row::new().spacing(8), |tabs, id| {
                let label = button(text(id.to_string()));
                let label = if self.gallery.grid.scenario == Some(*id) {
                    label
                } else {
                    label.on_press(Message::ScenarioTab(*id))
                };
                tabs.push(label)
            });

        let grid = self
            .gallery
            .grid
            .cards
            .chunks(3)
            .fold(Column::new().spacing(12), |grid, chunk| {
                grid.push(
                    chunk
                        .iter()
                        .fold(Row::new().spacing(12), |row, card| row.push(card_view(card))),
                )
            });

        column![
            text("Scenario results").size(24),
            tabs,
            grid,
            text("Ablation study").size(24),
            chart_canvas(&self.gallery.ablation),
            text("Parameter analysis").size(24),
            row![
                chart_canvas(&self.gallery.threshold),
                chart_canvas(&self.gallery.mofn)
            ]
            .spacing(12),
            row![
                chart_canvas(&self.gallery.band_sweep),
                chart_canvas(&self.gallery.band_snr)
            ]
            .spacing(12),
        ]
        .spacing(12)
        .into()
    }

    fn demo_view(&self) -> Element<'_, Message> {
        let samples = SAMPLES.iter().fold(Row::new().spacing(8), |row, sample| {
            row.push(
                button(text(format!("Sample {}", sample)))
                    .on_press(Message::SampleRequested(*sample)),
            )
        });

        let upload = row![
            text_input("Path to a .wav file", &self.upload_path)
                .on_input(Message::PathChanged)
                .padding(6)
                .width(Length::Fixed(360.0)),
            button("Process").on_press(Message::ProcessRequested),
            button("Reprocess").on_press(Message::ReprocessRequested),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let progress = self.pipeline.progress();
        let mut status = Column::new().spacing(6);
        if let Some(kind) = self.pipeline.active_kind() {
            let source = match kind {
                RunKind::Upload => "Uploaded file".to_string(),
                RunKind::Sample(sample) => format!("Sample {}", sample),
                RunKind::Reprocess => "Reprocessing upload".to_string(),
            };
            status = status
                .push(progress_bar(0.0..=100.0, f32::from(progress.percent)))
                .push(text(format!("{}: {}", source, progress.label)).size(14));
        }
        if let Some(notice) = &self.notice {
            status = status.push(text(notice.clone()).size(14));
        }

        let results = self.pipeline.results();
        let mut fields = Column::new().spacing(4);
        if let Some(audio) = &results.audio {
            fields = fields.push(text(format!(
                "Sample rate {}  |  Duration {}  |  Channels {}  |  Size {}",
                audio.sample_rate_label(),
                audio.duration_label(),
                audio.channels,
                audio.size_label()
            )));
        }
        if let Some(lesr) = &results.lesr {
            fields = fields.push(text(format!(
                "SNR improvement +{:.1} dB  |  Noise {}  |  {} ({:.1}%)",
                lesr.snr_improvement_db,
                if lesr.noise_filtered {
                    "filtered"
                } else {
                    "not detected"
                },
                lesr.replay_label(),
                lesr.confidence
            )));
        }
        if let Some(verdict) = &results.verdict {
            fields = fields.push(text(format!(
                "Similarity {:.3}  |  {}  |  Session {} {}",
                verdict.similarity,
                if verdict.authenticated {
                    "Authenticated"
                } else {
                    "Rejected"
                },
                verdict.session_label(),
                if verdict.session_passed {
                    "passed"
                } else {
                    "failed"
                }
            )));
        }

        column![
            text("Live demo").size(24),
            samples,
            upload,
            status,
            fields,
            row![
                chart_canvas(&self.demo.lesr),
                chart_canvas(&self.demo.features)
            ]
            .spacing(12),
            chart_canvas(&self.demo.spectrogram),
        ]
        .spacing(12)
        .into()
    }

    fn chart(&mut self, kind: ChartKind) -> DrawList {
        let dataset = kind
            .dataset_kind()
            .map(|dataset| self.provider.dataset(dataset, self.params));
        self.renderer.render_native(kind, dataset, &mut self.paint_rng)
    }

    fn chart_with(&mut self, kind: ChartKind, dataset: &Dataset) -> DrawList {
        self.renderer.render_native(kind, Some(dataset), &mut self.paint_rng)
    }

    fn redraw_bands(&mut self) {
        self.viz.sub_bands = self.chart(ChartKind::SubBands(self.lesr_mode));
        self.viz.snr = self.chart(ChartKind::SnrImprovement);
    }

    fn redraw_performance(&mut self) {
        self.provider.invalidate(DatasetKind::Roc);
        self.viz.roc = self.chart(ChartKind::Roc);
        self.viz.performance = self.chart(ChartKind::PerformanceBars);
    }

    fn redraw_visualizations(&mut self) {
        self.viz.clusters = self.chart(ChartKind::Clusters);
        self.redraw_bands();
        self.redraw_performance();
        self.viz.pipeline = self.chart(self.display.chart());
    }

    fn redraw_gallery(&mut self) {
        self.gallery.grid = self
            .presenter
            .select(self.presenter.active().key(), &mut self.paint_rng);
        self.gallery.ablation = self.chart(ChartKind::Ablation);
        self.gallery.threshold = self.chart(ChartKind::ThresholdSweep);
        self.gallery.mofn = self.chart(ChartKind::MofN);
        self.gallery.band_sweep = self.chart(ChartKind::BandSweep);
        self.gallery.band_snr = self.chart(ChartKind::BandSnr);
    }

    fn redraw_demo(&mut self) {
        let results = self.pipeline.results().clone();
        self.demo.lesr = match &results.lesr {
            Some(report) => {
                let bands = Dataset::LesrBands(report.bands.clone());
                self.chart_with(ChartKind::LesrBands, &bands)
            }
            None => placeholder(ChartKind::LesrBands, "LESR band analysis"),
        };
        self.demo.features = if results.features_ready {
            self.chart(ChartKind::FeatureSpace)
        } else {
            placeholder(ChartKind::FeatureSpace, "Feature space")
        };
        self.demo.spectrogram = match results.spectrogram {
            Some(grid) => {
                self.chart_with(ChartKind::LiveSpectrogram, &Dataset::LiveSpectrogram(grid))
            }
            None => placeholder(ChartKind::LiveSpectrogram, "Spectrogram"),
        };
    }
}

fn placeholder(kind: ChartKind, title: &str) -> DrawList {
    let size = kind.native_size();
    let mut list = DrawList::new(size.width, size.height);
    render_placeholder(&mut list, title);
    list
}

fn nav_button(label: &str, page: Page, current: Page) -> Element<'_, Message> {
    let button = button(text(label));
    if page == current {
        button.into()
    } else {
        button.on_press(Message::PageSelected(page)).into()
    }
}

fn card_view(card: &RenderedCard) -> Element<'_, Message> {
    column![
        text(card.title).size(16),
        text(card.value).size(28),
        chart_canvas(&card.drawing),
        text(card.description).size(12),
    ]
    .spacing(4)
    .width(Length::Fixed(300.0))
    .into()
}

async fn read_audio(path: String) -> Result<Arc<Vec<u8>>, String> {
    tokio::fs::read(&path)
        .await
        .map(Arc::new)
        .map_err(|e| format!("failed to read {path}: {e}"))
}
