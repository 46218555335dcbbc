//! Integration tests for the pump lifecycle across the orchestrating, pump and render threads.

use loading_screen_pump::engine::runtime::PUMP_THREAD_NAME_PREFIX;
use loading_screen_pump::{
    InstanceCounter, MovieStreamer, PumpConfig, PumpError, PumpThreadMarker, RenderThreadHandle,
    SynchronizationMechanism, WidgetRenderer,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct TestRenderer {
    draws: AtomicUsize,
    marker: Option<Arc<PumpThreadMarker>>,
    drew_off_pump_thread: AtomicBool,
}

impl WidgetRenderer for TestRenderer {
    fn draw_window(&self, _delta: Duration) {
        self.draws.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.marker {
            if !marker.is_pump_thread() {
                self.drew_off_pump_thread.store(true, Ordering::SeqCst);
            }
        }
    }
}

#[derive(Default)]
struct TestStreamer {
    calls: Mutex<Vec<&'static str>>,
}

impl MovieStreamer for TestStreamer {
    fn tick_pre_engine(&self) {
        self.calls.lock().unwrap().push("pre_engine");
    }

    fn tick_post_engine(&self) {
        self.calls.lock().unwrap().push("post_engine");
    }

    fn tick_post_render(&self) {
        self.calls.lock().unwrap().push("post_render");
    }
}

/// Simulated render thread: submits every enqueued frame until told to stop.
struct Consumer {
    stop: Arc<AtomicBool>,
    thread: thread::JoinHandle<usize>,
}

impl Consumer {
    fn spawn(handle: RenderThreadHandle) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = {
            let stop = stop.clone();
            thread::spawn(move || {
                let mut submitted = 0;
                while !stop.load(Ordering::Acquire) {
                    if handle.render_tick(|| {}) {
                        submitted += 1;
                    }
                    thread::sleep(Duration::from_millis(1));
                }
                submitted
            })
        };
        Self { stop, thread }
    }

    fn finish(self) -> usize {
        self.stop.store(true, Ordering::Release);
        self.thread.join().unwrap()
    }
}

fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}

fn mechanism(renderer: Arc<TestRenderer>) -> SynchronizationMechanism {
    SynchronizationMechanism::new(renderer, None, PumpConfig::with_target_fps(120)).unwrap()
}

#[test]
fn test_initialize_then_shutdown() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone());
    let consumer = Consumer::spawn(mechanism.render_handle());

    mechanism.initialize().unwrap();
    assert!(mechanism.is_main_loop_running());
    assert!(mechanism.is_main_loop_active());
    assert!(wait_until(Duration::from_secs(5), || {
        renderer.draws.load(Ordering::SeqCst) >= 3
    }));

    mechanism.shutdown().unwrap();
    assert!(!mechanism.is_main_loop_running());
    assert!(!mechanism.is_main_loop_active());
    assert!(!mechanism.is_draw_pass_enqueued());
    assert!(mechanism.thread_name().is_none());

    let submitted = consumer.finish();
    let draws = renderer.draws.load(Ordering::SeqCst);
    assert_eq!(submitted, draws);
    assert_eq!(mechanism.stats().frames_produced, draws as u64);
}

#[test]
fn test_pump_can_be_restarted() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone());
    let consumer = Consumer::spawn(mechanism.render_handle());

    for round in 1..=3 {
        mechanism.initialize().unwrap();
        assert_eq!(
            mechanism.thread_name(),
            Some(format!("{PUMP_THREAD_NAME_PREFIX}{round}").as_str())
        );
        mechanism.shutdown().unwrap();
        assert!(!mechanism.is_main_loop_active());
    }

    consumer.finish();
}

#[test]
fn test_second_initialize_is_rejected() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer);
    let consumer = Consumer::spawn(mechanism.render_handle());

    mechanism.initialize().unwrap();
    let name = mechanism.thread_name().map(str::to_string);

    match mechanism.initialize() {
        Err(PumpError::AlreadyRunning { thread_name }) => {
            assert_eq!(Some(thread_name), name);
        }
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }
    assert_eq!(mechanism.thread_name().map(str::to_string), name);

    mechanism.shutdown().unwrap();
    consumer.finish();
}

#[test]
fn test_foreign_thread_is_rejected() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone());

    thread::scope(|scope| {
        let mechanism = &mut mechanism;
        scope
            .spawn(move || {
                assert!(matches!(
                    mechanism.initialize(),
                    Err(PumpError::WrongThread {
                        operation: "initialize"
                    })
                ));
                assert!(matches!(
                    mechanism.shutdown(),
                    Err(PumpError::WrongThread {
                        operation: "shutdown"
                    })
                ));
            })
            .join()
            .unwrap();
    });

    assert!(mechanism.thread_name().is_none());
    assert!(!mechanism.is_main_loop_active());
    assert_eq!(renderer.draws.load(Ordering::SeqCst), 0);
}

#[test]
fn test_shutdown_waits_for_the_last_submission() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone());
    let handle = mechanism.render_handle();

    mechanism.initialize().unwrap();
    assert!(wait_until(Duration::from_secs(5), || handle.is_draw_pass_enqueued()));

    let delay = Duration::from_millis(100);
    let late_consumer = {
        let handle = handle.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            handle.reset_draw_pass_enqueued();
        })
    };

    let started = Instant::now();
    mechanism.shutdown().unwrap();
    let waited = started.elapsed();

    assert!(waited >= delay - Duration::from_millis(20), "waited {waited:?}");
    assert!(waited < Duration::from_secs(5), "waited {waited:?}");
    assert!(!handle.is_draw_pass_enqueued());
    assert_eq!(renderer.draws.load(Ordering::SeqCst), 1);
    late_consumer.join().unwrap();
}

#[test]
fn test_shutdown_blocks_while_consumer_is_away() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);
    let finished = Arc::new(AtomicBool::new(false));

    let orchestrator = {
        let renderer = renderer.clone();
        let finished = finished.clone();
        thread::spawn(move || {
            let mut mechanism = mechanism(renderer);
            let handle = mechanism.render_handle();
            mechanism.initialize().unwrap();
            assert!(wait_until(Duration::from_secs(5), || handle.is_draw_pass_enqueued()));
            handle_tx.send(handle).unwrap();

            mechanism.shutdown().unwrap();
            finished.store(true, Ordering::SeqCst);
        })
    };

    let handle: RenderThreadHandle = handle_rx.recv().unwrap();
    thread::sleep(Duration::from_millis(200));
    assert!(!finished.load(Ordering::SeqCst));

    handle.reset_draw_pass_enqueued();
    orchestrator.join().unwrap();
    assert!(finished.load(Ordering::SeqCst));
}

#[test]
fn test_stalled_consumer_gets_one_frame() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone());

    mechanism.initialize().unwrap();
    thread::sleep(Duration::from_millis(150));

    let stats = mechanism.stats();
    assert_eq!(stats.frames_produced, 1);
    assert!(stats.frames_skipped > 0);
    assert!(mechanism.is_draw_pass_enqueued());

    mechanism.request_stop();
    mechanism.shutdown().unwrap();
    assert!(renderer.draws.load(Ordering::SeqCst) <= 2);
}

#[test]
fn test_shared_counter_names_threads() {
    init_logger();
    let counter = Arc::new(InstanceCounter::new());
    let mut first = mechanism(Arc::new(TestRenderer::default()))
        .with_instance_counter(counter.clone());
    let mut second = mechanism(Arc::new(TestRenderer::default()))
        .with_instance_counter(counter.clone());
    let consumers = [
        Consumer::spawn(first.render_handle()),
        Consumer::spawn(second.render_handle()),
    ];

    first.initialize().unwrap();
    second.initialize().unwrap();
    assert_eq!(first.thread_name(), Some("LoadingScreenPump1"));
    assert_eq!(second.thread_name(), Some("LoadingScreenPump2"));

    first.shutdown().unwrap();
    second.shutdown().unwrap();
    for consumer in consumers {
        consumer.finish();
    }
}

#[test]
fn test_marker_identifies_the_pump_thread() {
    init_logger();
    let marker = Arc::new(PumpThreadMarker::new());
    let renderer = Arc::new(TestRenderer {
        marker: Some(marker.clone()),
        ..TestRenderer::default()
    });
    let mut mechanism = mechanism(renderer.clone()).with_thread_marker(marker.clone());
    let consumer = Consumer::spawn(mechanism.render_handle());

    assert!(marker.pump_thread().is_none());
    mechanism.initialize().unwrap();
    assert!(wait_until(Duration::from_secs(5), || {
        renderer.draws.load(Ordering::SeqCst) >= 2
    }));
    assert!(marker.pump_thread().is_some());
    assert!(!marker.is_pump_thread());

    mechanism.shutdown().unwrap();
    consumer.finish();

    assert!(marker.pump_thread().is_none());
    assert!(!renderer.drew_off_pump_thread.load(Ordering::SeqCst));
}

#[test]
fn test_only_the_pump_thread_produces() {
    init_logger();
    let marker = Arc::new(PumpThreadMarker::new());
    let renderer = Arc::new(TestRenderer {
        marker: Some(marker.clone()),
        ..TestRenderer::default()
    });
    let mut mechanism = mechanism(renderer.clone()).with_thread_marker(marker.clone());

    mechanism.initialize().unwrap();
    let started = Instant::now();
    let mut submitted = 0;
    while started.elapsed() < Duration::from_millis(200) {
        if mechanism.is_draw_pass_enqueued() {
            submitted += 1;
            mechanism.reset_draw_pass_enqueued();
        }
        assert!(!marker.is_pump_thread());
    }
    assert!(mechanism.is_main_loop_active());

    let consumer = Consumer::spawn(mechanism.render_handle());
    mechanism.shutdown().unwrap();
    submitted += consumer.finish();

    let draws = renderer.draws.load(Ordering::SeqCst);
    assert!(draws > 0);
    assert_eq!(submitted, draws);
    assert_eq!(mechanism.stats().frames_produced, draws as u64);
    assert!(!renderer.drew_off_pump_thread.load(Ordering::SeqCst));
}

#[test]
fn test_event_pump_runs_while_shutdown_waits() {
    init_logger();
    let pumped = Arc::new(AtomicUsize::new(0));
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = {
        let pumped = pumped.clone();
        mechanism(renderer).with_event_pump(move || {
            pumped.fetch_add(1, Ordering::SeqCst);
        })
    };
    let handle = mechanism.render_handle();

    mechanism.initialize().unwrap();
    assert!(wait_until(Duration::from_secs(5), || handle.is_draw_pass_enqueued()));

    let late_consumer = {
        let handle = handle.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            handle.reset_draw_pass_enqueued();
        })
    };

    mechanism.shutdown().unwrap();
    late_consumer.join().unwrap();
    assert!(pumped.load(Ordering::SeqCst) > 0);
}

#[test]
fn test_movie_hooks_wrap_each_frame() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let streamer = Arc::new(TestStreamer::default());
    let mut mechanism = SynchronizationMechanism::new(
        renderer.clone(),
        Some(streamer.clone()),
        PumpConfig::with_target_fps(120),
    )
    .unwrap();
    let consumer = Consumer::spawn(mechanism.render_handle());

    mechanism.initialize().unwrap();
    assert!(wait_until(Duration::from_secs(5), || {
        renderer.draws.load(Ordering::SeqCst) >= 3
    }));
    mechanism.shutdown().unwrap();
    consumer.finish();

    let calls = streamer.calls.lock().unwrap();
    let draws = renderer.draws.load(Ordering::SeqCst);
    assert_eq!(calls.len(), draws * 3);
    for frame in calls.chunks(3) {
        assert_eq!(frame, ["pre_engine", "post_engine", "post_render"]);
    }
}

#[test]
fn test_drop_stops_the_worker() {
    init_logger();
    let marker = Arc::new(PumpThreadMarker::new());
    let renderer = Arc::new(TestRenderer::default());
    let mut mechanism = mechanism(renderer.clone()).with_thread_marker(marker.clone());
    let consumer = Consumer::spawn(mechanism.render_handle());

    mechanism.initialize().unwrap();
    assert!(wait_until(Duration::from_secs(5), || marker.pump_thread().is_some()));

    drop(mechanism);
    consumer.finish();

    assert!(marker.pump_thread().is_none());
    assert_eq!(Arc::strong_count(&renderer), 1);
}

#[test]
fn test_disabled_config_spawns_nothing() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let config = PumpConfig {
        enabled: false,
        ..PumpConfig::default()
    };
    let mut mechanism = SynchronizationMechanism::new(renderer.clone(), None, config).unwrap();

    mechanism.initialize().unwrap();
    thread::sleep(Duration::from_millis(50));
    assert!(mechanism.thread_name().is_none());
    assert!(!mechanism.is_main_loop_running());
    mechanism.shutdown().unwrap();

    assert_eq!(renderer.draws.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    init_logger();
    let renderer = Arc::new(TestRenderer::default());
    let result = SynchronizationMechanism::new(renderer, None, PumpConfig::with_target_fps(0));
    assert!(matches!(result, Err(PumpError::InvalidConfig(_))));
}
