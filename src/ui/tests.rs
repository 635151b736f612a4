use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::action::Action;
use crate::analysis::{self, AlertSummary};
use crate::app::{App, ResolvedKeybinds, View};
use crate::config::{Config, KeybindsConfig};
use crate::system::collector::MetricsCollector;
use crate::system::snapshot::{LoadAverage, MemoryPressure, MetricsSnapshot};
use crate::ui::theme::Theme;
use crate::ui::{draw, recommendations, statusbar, system_panel};

const GB: u64 = 1024 * 1024 * 1024;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

struct FixedCollector(MetricsSnapshot);

impl MetricsCollector for FixedCollector {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn collect(&mut self) -> MetricsSnapshot {
        self.0.clone()
    }
}

fn stressed_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cpu_usage_percent: 95.0,
        load_average: LoadAverage::new(8.0, 6.5, 5.25),
        cpu_core_count: 4,
        cpu_model: "Intel Core i5-8250U".to_string(),
        memory_total_bytes: 16 * GB,
        memory_used_bytes: 8 * GB,
        swap_used_bytes: GB / 2,
        swap_total_bytes: 2 * GB,
        memory_pressure: MemoryPressure::Normal,
        gpu_model: "Apple M2".to_string(),
        uptime_secs: 2 * 86_400 + 3 * 3600 + 4 * 60,
    }
}

fn healthy_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cpu_usage_percent: 10.0,
        load_average: LoadAverage::uniform(0.5),
        cpu_core_count: 8,
        cpu_model: "AMD Ryzen 7 5800X".to_string(),
        memory_total_bytes: 32 * GB,
        memory_used_bytes: 4 * GB,
        memory_pressure: MemoryPressure::Normal,
        gpu_model: "NVIDIA GeForce RTX 3070".to_string(),
        ..Default::default()
    }
}

fn make_app(snapshot: MetricsSnapshot) -> App {
    App::new(&Config::default(), Box::new(FixedCollector(snapshot)))
}

fn render_app(app: &App) -> String {
    render_to_string(160, 40, |frame| draw(frame, app))
}

#[test]
fn dashboard_shows_status_and_grouped_findings() {
    let app = make_app(stressed_snapshot());
    let screen = render_app(&app);

    assert!(screen.contains("System Bottleneck Monitor"));
    assert!(screen.contains("Last updated:"));
    assert!(screen.contains("fixed"));
    assert!(screen.contains("Quick Status"));
    assert!(screen.contains("CPU: 95.0%"));
    assert!(screen.contains("Load: 8.00"));
    assert!(screen.contains("Swap: 0.5GB"));

    assert!(screen.contains("Current System Status"));
    assert!(screen.contains("Intel Core i5-8250U (4 cores)"));
    assert!(screen.contains("Load Average: 8.00, 6.50, 5.25"));
    assert!(screen.contains("8.0GB used / 16.0GB total (50.0%)"));
    assert!(screen.contains("Swap: 512MB used / 2048MB total"));
    assert!(screen.contains("Memory Pressure: normal"));
    assert!(screen.contains("GPU: Apple M2"));

    assert!(screen.contains("Active Alerts"));
    assert!(screen.contains("CRITICAL: 1 issue(s) need immediate attention"));
    assert!(screen.contains("HIGH: 1 issue(s) affecting performance"));

    assert!(screen.contains("Upgrade Recommendations"));
    assert!(screen.contains("CPU usage is very high (95.0%)"));
    assert!(screen.contains("Load average (8.00) is high for 4 cores"));
    let critical = screen.find("CPU usage is very high").unwrap();
    let medium = screen.find("CPU model appears to be older generation").unwrap();
    assert!(critical < medium);
}

#[test]
fn healthy_dashboard() {
    let app = make_app(healthy_snapshot());
    let screen = render_app(&app);

    assert!(screen.contains("System Status: Good"));
    assert!(screen.contains("Great! No bottlenecks detected"));
    assert!(!screen.contains("Active Alerts"));
    assert!(!screen.contains("Swap:"));
}

#[test]
fn details_overlay() {
    let mut app = make_app(stressed_snapshot());
    app.dispatch(Action::ShowDetails);
    let screen = render_app(&app);

    assert!(screen.contains("Detailed System Information"));
    assert!(screen.contains("System Hardware:"));
    assert!(screen.contains("Total RAM: 16.0GB"));
    assert!(screen.contains("Load Averages: 8.00 (1m), 6.50 (5m), 5.25 (15m)"));
    assert!(screen.contains("Memory Usage: 50.0% (8.0GB used)"));
    assert!(screen.contains("Swap Usage: 0.5GB"));
    assert!(screen.contains("2 days, 3 hours, 4 minutes"));
}

#[test]
fn help_overlay() {
    let mut app = make_app(healthy_snapshot());
    app.dispatch(Action::ShowHelp);
    assert_eq!(app.view, View::Help);
    let screen = render_app(&app);

    assert!(screen.contains("Help & Usage Guide"));
    assert!(screen.contains("Updates every 10 seconds automatically"));
    assert!(screen.contains("Green - Good performance"));
    assert!(screen.contains("Red - High usage/critical issue"));
    assert!(screen.contains("CRITICAL - Immediate action required"));
    assert!(screen.contains("LOW - Optional improvements"));
    assert!(screen.contains("Refresh advice and recommendations"));
    assert!(screen.contains("Quit (always)"));
}

#[test]
fn statusbar_pills_follow_keybinds() {
    let theme = Theme::dark();
    let kb = KeybindsConfig {
        quit: "x".to_string(),
        ..Default::default()
    };
    let keybinds = ResolvedKeybinds::from_config(&kb);

    let bar = render_to_string(100, 1, |frame| {
        statusbar::render(frame, frame.area(), View::Dashboard, None, &keybinds, &theme)
    });
    assert!(bar.contains(" x  Quit"));
    assert!(bar.contains(" d  Details"));

    let bar = render_to_string(100, 1, |frame| {
        statusbar::render(frame, frame.area(), View::Help, None, &keybinds, &theme)
    });
    assert!(bar.contains("Esc  Back"));
    assert!(!bar.contains("Details"));
}

#[test]
fn statusbar_message_replaces_pills() {
    let theme = Theme::dark();
    let keybinds = ResolvedKeybinds::from_config(&KeybindsConfig::default());
    let bar = render_to_string(100, 1, |frame| {
        statusbar::render(
            frame,
            frame.area(),
            View::Dashboard,
            Some("Unknown command: 'z'. Press h for help."),
            &keybinds,
            &theme,
        )
    });
    assert!(bar.contains("Unknown command: 'z'"));
    assert!(!bar.contains("Quit"));
}

#[test]
fn alerts_banner_counts() {
    let theme = Theme::dark();
    let screen = render_to_string(70, 5, |frame| {
        system_panel::render_alerts(
            frame,
            frame.area(),
            AlertSummary {
                critical: 0,
                high: 2,
            },
            &theme,
        )
    });
    assert!(screen.contains("HIGH: 2 issue(s) affecting performance"));
    assert!(!screen.contains("CRITICAL:"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app = make_app(stressed_snapshot());
    render_to_string(20, 6, |frame| draw(frame, &app));
    app.dispatch(Action::ShowHelp);
    render_to_string(20, 6, |frame| draw(frame, &app));
    app.dispatch(Action::ShowDetails);
    render_to_string(3, 3, |frame| draw(frame, &app));
}

fn overloaded_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cpu_usage_percent: 75.0,
        load_average: LoadAverage::uniform(1.0),
        cpu_core_count: 8,
        cpu_model: "Intel(R) Core(TM) i3-7100U".to_string(),
        memory_total_bytes: 4 * GB,
        memory_used_bytes: 4 * GB - GB / 10,
        swap_used_bytes: 3 * GB,
        swap_total_bytes: 4 * GB,
        memory_pressure: MemoryPressure::Critical,
        gpu_model: "Intel HD Graphics 620".to_string(),
        ..Default::default()
    }
}

#[test]
fn clipped_recommendations_announce_hidden_lines() {
    let theme = Theme::dark();
    let recs = analysis::analyze(&overloaded_snapshot());
    // 3 groups, 7 findings
    assert_eq!(recommendations::line_count(&recs), 19);

    // wide enough that nothing wraps; 8 inner rows
    let top = render_to_string(220, 10, |frame| {
        recommendations::render(frame, frame.area(), &recs, 0, &theme)
    });
    assert!(top.contains("Memory usage is critical"));
    assert!(top.contains("11 more lines"));
    assert!(!top.contains("Using integrated Intel graphics"));

    let bottom = render_to_string(220, 10, |frame| {
        recommendations::render(frame, frame.area(), &recs, u16::MAX, &theme)
    });
    assert!(bottom.contains("Using integrated Intel graphics"));
    assert!(bottom.contains("11 above"));
    assert!(!bottom.contains("more lines"));
}

#[test]
fn unclipped_recommendations_have_no_scroll_hint() {
    let theme = Theme::dark();
    let recs = analysis::analyze(&overloaded_snapshot());
    let screen = render_to_string(220, 30, |frame| {
        recommendations::render(frame, frame.area(), &recs, 3, &theme)
    });
    assert!(screen.contains("Memory usage is critical"));
    assert!(!screen.contains("more lines"));
    assert!(!screen.contains("above"));
}

#[test]
fn arrow_keys_scroll_dashboard_panel() {
    let mut app = make_app(overloaded_snapshot());
    let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    for _ in 0..3 {
        let action = app.map_key(down);
        app.dispatch(action);
    }
    assert_eq!(app.recommendations_scroll, 3);

    let screen = render_to_string(220, 20, |frame| draw(frame, &app));
    assert!(screen.contains("3 above"));
}
