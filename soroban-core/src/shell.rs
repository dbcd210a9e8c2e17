//! Cooperative main loop
//!
//! One execution context drives everything: matrix polling on a 10 ms
//! cadence and input dispatch + app update + render on a 33 ms (~30 fps)
//! cadence. Both deadlines advance relative to the previous deadline, not
//! to "now", so neither cadence accumulates drift.
//!
//! [`Shell::tick`] is pure with respect to time - the caller supplies the
//! timestamp - which keeps the whole loop testable on the host. The
//! firmware calls it from a single task with a sub-millisecond yield in
//! between, so no deadline is ever starved for long.

use soroban_display::{DisplayError, Draw, Rgb565};

use crate::app::{AppRegistry, NavRequest, Navigator};
use crate::keys::{EventQueue, KeyEventKind, MatrixScanner, ScanTiming};
use crate::time::Instant;
use crate::traits::KeyMatrix;

/// Cadences of the two loop timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopTiming {
    /// Matrix poll period
    pub scan_period_us: u64,
    /// Dispatch/update/render period (~30 fps)
    pub frame_period_us: u64,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            scan_period_us: 10_000,
            frame_period_us: 33_000,
        }
    }
}

/// The device shell: scanner, event queue, app registry, and both timers
pub struct Shell<'a, M: KeyMatrix> {
    scanner: MatrixScanner<M>,
    queue: EventQueue,
    registry: AppRegistry<'a>,
    nav: Navigator,
    timing: LoopTiming,
    next_scan: Instant,
    next_frame: Instant,
}

impl<'a, M: KeyMatrix> Shell<'a, M> {
    pub fn new(matrix: M, registry: AppRegistry<'a>) -> Self {
        Self::with_timing(matrix, registry, ScanTiming::default(), LoopTiming::default())
    }

    pub fn with_timing(
        matrix: M,
        registry: AppRegistry<'a>,
        scan: ScanTiming,
        timing: LoopTiming,
    ) -> Self {
        Self {
            scanner: MatrixScanner::with_timing(matrix, scan),
            queue: EventQueue::new(),
            registry,
            nav: Navigator::new(),
            timing,
            next_scan: Instant::EPOCH,
            next_frame: Instant::EPOCH,
        }
    }

    /// Activate the home app and anchor both deadlines at `now`
    pub fn start(&mut self, now: Instant) {
        self.registry.return_home();
        self.next_scan = now;
        self.next_frame = now;
    }

    pub fn registry(&self) -> &AppRegistry<'a> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AppRegistry<'a> {
        &mut self.registry
    }

    /// One cooperative iteration
    ///
    /// Runs at most one scan step and one frame step, depending on which
    /// deadlines have passed. Cheap when neither has.
    pub fn tick(&mut self, now: Instant, display: &mut dyn Draw) -> Result<(), DisplayError> {
        if now >= self.next_scan {
            self.scanner.poll(now, &mut self.queue);
            self.next_scan = self.next_scan.add_micros(self.timing.scan_period_us);
        }

        if now >= self.next_frame {
            self.run_frame(now, display)?;
            self.next_frame = self.next_frame.add_micros(self.timing.frame_period_us);
        }

        Ok(())
    }

    fn run_frame(&mut self, now: Instant, display: &mut dyn Draw) -> Result<(), DisplayError> {
        let held = self.scanner.held();

        // Drain everything the scanner produced. Only Pressed reaches the
        // app: apps react to discrete presses, holds are visible through
        // the context's key state instead.
        while let Some(event) = self.queue.pop() {
            if event.kind == KeyEventKind::Pressed {
                self.registry.dispatch_key(event.code, now, held, &mut self.nav);
                self.apply_nav();
            }
        }

        self.registry.update_active(now, held, &mut self.nav);
        self.apply_nav();

        if self.registry.active_index().is_some() {
            display.clear(Rgb565::BLACK)?;
            self.registry
                .render_active(display, now, held, &mut self.nav)?;
            display.present()?;
        }

        Ok(())
    }

    /// Apply a pending switch request from the app that just ran
    fn apply_nav(&mut self) {
        match self.nav.take() {
            Some(NavRequest::SwitchTo(index)) => self.registry.switch_to(index),
            Some(NavRequest::Launch(name)) => self.registry.launch_by_name(name),
            Some(NavRequest::Home) => self.registry.return_home(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, AppContext};
    use core::cell::Cell;
    use soroban_display::FramebufferDisplay;

    struct FakeMatrix<'m> {
        bits: &'m Cell<u16>,
        reads: &'m Cell<u32>,
    }

    impl KeyMatrix for FakeMatrix<'_> {
        fn read(&mut self) -> u16 {
            self.reads.set(self.reads.get() + 1);
            self.bits.get()
        }
    }

    /// App that records dispatched key codes and optionally requests a
    /// switch on a trigger key
    struct ProbeApp {
        name: &'static str,
        keys: heapless::Vec<u8, 16>,
        updates: u32,
        renders: u32,
        inits: u32,
        destroys: u32,
        home_key: Option<u8>,
    }

    impl ProbeApp {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                keys: heapless::Vec::new(),
                updates: 0,
                renders: 0,
                inits: 0,
                destroys: 0,
                home_key: None,
            }
        }
    }

    impl App for ProbeApp {
        fn name(&self) -> &'static str {
            self.name
        }

        fn icon(&self) -> &'static str {
            "#"
        }

        fn init(&mut self) {
            self.inits += 1;
        }

        fn update(&mut self, _ctx: &mut AppContext<'_>) {
            self.updates += 1;
        }

        fn render(
            &mut self,
            _display: &mut dyn Draw,
            _ctx: &AppContext<'_>,
        ) -> Result<(), DisplayError> {
            self.renders += 1;
            Ok(())
        }

        fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
            let _ = self.keys.push(code);
            if self.home_key == Some(code) {
                ctx.nav.home();
            }
        }

        fn destroy(&mut self) {
            self.destroys += 1;
        }
    }

    fn run_until(
        shell: &mut Shell<'_, FakeMatrix<'_>>,
        display: &mut FramebufferDisplay<16, 16>,
        from_ms: u64,
        to_ms: u64,
    ) {
        for ms in from_ms..=to_ms {
            shell.tick(Instant::from_millis(ms), display).unwrap();
        }
    }

    #[test]
    fn test_scan_and_frame_cadence() {
        let bits = Cell::new(0);
        let reads = Cell::new(0);
        let mut app = ProbeApp::new("Home");
        let mut display = FramebufferDisplay::<16, 16>::new();

        {
            let mut registry = AppRegistry::new();
            registry.register(&mut app);
            let matrix = FakeMatrix {
                bits: &bits,
                reads: &reads,
            };
            let mut shell = Shell::new(matrix, registry);
            shell.start(Instant::EPOCH);
            run_until(&mut shell, &mut display, 0, 330);
        }

        // 10ms scan period over 331 ticks: polls at 0,10,..,330
        assert_eq!(reads.get(), 34);
        // 33ms frame period: frames at 0,33,..,330
        assert_eq!(app.updates, 11);
        assert_eq!(app.renders, 11);
        assert_eq!(display.present_count(), 11);
    }

    #[test]
    fn test_deadlines_do_not_drift() {
        // Skip ticks entirely between 1ms and 99ms; the frame deadline
        // chain stays anchored at 0,33,66,.. rather than restarting at the
        // time the loop woke up.
        let bits = Cell::new(0);
        let reads = Cell::new(0);
        let mut app = ProbeApp::new("Home");
        let mut display = FramebufferDisplay::<16, 16>::new();

        {
            let mut registry = AppRegistry::new();
            registry.register(&mut app);
            let matrix = FakeMatrix {
                bits: &bits,
                reads: &reads,
            };
            let mut shell = Shell::new(matrix, registry);
            shell.start(Instant::EPOCH);
            shell.tick(Instant::EPOCH, &mut display).unwrap();
            // Stall, then resume normal ticking
            run_until(&mut shell, &mut display, 100, 135);
        }

        // Frames: t=0, then catch-up chain 33,66,99 fires at t=100,101,102,
        // then 132 on schedule. 135 < 165, so five frames total.
        assert_eq!(app.renders, 5);
    }

    #[test]
    fn test_only_pressed_events_reach_app() {
        let bits = Cell::new(0);
        let reads = Cell::new(0);
        let mut app = ProbeApp::new("Home");
        let mut display = FramebufferDisplay::<16, 16>::new();

        {
            let mut registry = AppRegistry::new();
            registry.register(&mut app);
            let matrix = FakeMatrix {
                bits: &bits,
                reads: &reads,
            };
            let mut shell = Shell::new(matrix, registry);
            shell.start(Instant::EPOCH);

            // Hold key 4 long enough to generate repeats, then release
            bits.set(1 << 4);
            run_until(&mut shell, &mut display, 0, 500);
            bits.set(0);
            run_until(&mut shell, &mut display, 501, 560);
        }

        // One press despite repeats and the release also passing through
        // the queue
        assert_eq!(&app.keys[..], &[4]);
    }

    #[test]
    fn test_app_requested_switch_applies_in_dispatch_step() {
        let bits = Cell::new(0);
        let reads = Cell::new(0);
        let mut home = ProbeApp::new("Home");
        let mut other = ProbeApp::new("Other");
        other.home_key = Some(7);
        let mut display = FramebufferDisplay::<16, 16>::new();

        {
            let mut registry = AppRegistry::new();
            registry.register(&mut home);
            registry.register(&mut other);
            let matrix = FakeMatrix {
                bits: &bits,
                reads: &reads,
            };
            let mut shell = Shell::new(matrix, registry);
            shell.start(Instant::EPOCH);
            shell.registry_mut().launch_by_name("Other");

            bits.set(1 << 7);
            run_until(&mut shell, &mut display, 0, 60);

            assert_eq!(shell.registry().active_index(), Some(0));
        }

        assert_eq!(&other.keys[..], &[7]);
        assert_eq!(other.destroys, 1);
        // Boot + return home
        assert_eq!(home.inits, 2);
    }

    #[test]
    fn test_no_active_app_skips_frame_work() {
        let bits = Cell::new(0);
        let reads = Cell::new(0);
        let mut display = FramebufferDisplay::<16, 16>::new();

        let registry = AppRegistry::new();
        let matrix = FakeMatrix {
            bits: &bits,
            reads: &reads,
        };
        let mut shell = Shell::new(matrix, registry);
        // start() on an empty registry leaves no app active
        shell.start(Instant::EPOCH);

        bits.set(1);
        for ms in 0..=100u64 {
            shell
                .tick(Instant::from_millis(ms), &mut display)
                .unwrap();
        }
        assert_eq!(display.present_count(), 0);
    }
}
