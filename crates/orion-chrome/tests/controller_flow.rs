use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::join;
use orion_chrome::{
    ChromeController, ChromeError, ChromePhase, ChromeSnapshot, MaximizeIcon, ResizeCallback,
    ResizeSubscription, TitleBarConfig, TitleBarView, WindowAction, WindowControl, WindowHandle,
    WindowProvider, title_bar_view,
};

#[derive(Default)]
struct FakeOs {
    maximized: bool,
    deny_toggle: bool,
    fail_minimize: bool,
    fail_toggle: bool,
    fail_close: bool,
    fail_query: bool,
    fail_subscribe: bool,
    minimize_calls: usize,
    toggle_calls: usize,
    close_calls: usize,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
    query_results: Vec<bool>,
    toggle_gates: VecDeque<oneshot::Receiver<()>>,
    query_gates: VecDeque<oneshot::Receiver<()>>,
    subscribe_gate: Option<oneshot::Receiver<()>>,
    resize_listener: Option<Rc<dyn Fn()>>,
    // Kept even after unlisten, to simulate a late OS notification.
    leaked_listener: Option<Rc<dyn Fn()>>,
}

type Os = Rc<RefCell<FakeOs>>;

fn rejected(action: WindowAction) -> ChromeError {
    ChromeError::action(action, "rejected by fake os")
}

struct FakeWindow {
    os: Os,
}

impl WindowHandle for FakeWindow {
    async fn is_maximized(&self) -> Result<bool, ChromeError> {
        let (value, gate) = {
            let mut os = self.os.borrow_mut();
            (os.maximized, os.query_gates.pop_front())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let mut os = self.os.borrow_mut();
        if os.fail_query {
            return Err(rejected(WindowAction::QueryMaximized));
        }
        os.query_results.push(value);
        Ok(value)
    }

    async fn minimize(&self) -> Result<(), ChromeError> {
        let mut os = self.os.borrow_mut();
        os.minimize_calls += 1;
        if os.fail_minimize {
            return Err(rejected(WindowAction::Minimize));
        }
        Ok(())
    }

    async fn toggle_maximize(&self) -> Result<(), ChromeError> {
        let gate = {
            let mut os = self.os.borrow_mut();
            os.toggle_calls += 1;
            os.toggle_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let mut os = self.os.borrow_mut();
        if os.fail_toggle {
            return Err(rejected(WindowAction::ToggleMaximize));
        }
        if !os.deny_toggle {
            os.maximized = !os.maximized;
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), ChromeError> {
        let mut os = self.os.borrow_mut();
        os.close_calls += 1;
        if os.fail_close {
            return Err(rejected(WindowAction::Close));
        }
        Ok(())
    }

    async fn on_resized(
        &self,
        callback: ResizeCallback,
    ) -> Result<ResizeSubscription, ChromeError> {
        let gate = {
            let mut os = self.os.borrow_mut();
            os.subscribe_calls += 1;
            os.subscribe_gate.take()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let mut os = self.os.borrow_mut();
        if os.fail_subscribe {
            return Err(rejected(WindowAction::SubscribeResize));
        }
        let callback: Rc<dyn Fn()> = Rc::from(callback);
        os.resize_listener = Some(callback.clone());
        os.leaked_listener = Some(callback);

        let os_for_unlisten = self.os.clone();
        Ok(ResizeSubscription::new(move || {
            let mut os = os_for_unlisten.borrow_mut();
            os.unsubscribe_calls += 1;
            os.resize_listener = None;
        }))
    }
}

struct FakeProvider {
    os: Os,
    fail: bool,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    acquisitions: Rc<Cell<usize>>,
}

impl WindowProvider for FakeProvider {
    type Handle = FakeWindow;

    async fn current(&self) -> Result<FakeWindow, ChromeError> {
        self.acquisitions.set(self.acquisitions.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail {
            return Err(ChromeError::acquisition("no window available"));
        }
        Ok(FakeWindow {
            os: self.os.clone(),
        })
    }
}

struct Harness {
    pool: LocalPool,
    os: Os,
    acquisitions: Rc<Cell<usize>>,
    controller: ChromeController<FakeProvider>,
}

struct ProviderSetup {
    fail: bool,
    gate: Option<oneshot::Receiver<()>>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn harness_with(setup: ProviderSetup, os_setup: impl FnOnce(&mut FakeOs)) -> Harness {
    init_tracing();
    let pool = LocalPool::new();
    let os: Os = Rc::new(RefCell::new(FakeOs::default()));
    os_setup(&mut os.borrow_mut());
    let acquisitions = Rc::new(Cell::new(0));
    let provider = FakeProvider {
        os: os.clone(),
        fail: setup.fail,
        gate: RefCell::new(setup.gate),
        acquisitions: acquisitions.clone(),
    };
    let controller = ChromeController::new(provider, pool.spawner());
    Harness {
        pool,
        os,
        acquisitions,
        controller,
    }
}

fn harness(os_setup: impl FnOnce(&mut FakeOs)) -> Harness {
    harness_with(
        ProviderSetup {
            fail: false,
            gate: None,
        },
        os_setup,
    )
}

fn mounted(os_setup: impl FnOnce(&mut FakeOs)) -> Harness {
    let mut h = harness(os_setup);
    h.pool.run_until(h.controller.mount());
    assert_eq!(h.controller.phase(), ChromePhase::Ready);
    h
}

fn fire_resize(os: &Os) {
    let listener = os.borrow().resize_listener.clone();
    if let Some(listener) = listener {
        listener();
    }
}

fn maximize_icon(snapshot: &ChromeSnapshot) -> Option<MaximizeIcon> {
    match title_bar_view(&TitleBarConfig::default(), snapshot) {
        TitleBarView::Bar { maximize_icon, .. } => Some(maximize_icon),
        TitleBarView::Placeholder => None,
    }
}

#[test]
fn mount_seeds_state_and_shows_maximize_icon() {
    let h = mounted(|os| os.maximized = false);

    let snapshot = h.controller.snapshot();
    assert!(!snapshot.is_maximized);
    assert_eq!(maximize_icon(&snapshot), Some(MaximizeIcon::Maximize));

    let os = h.os.borrow();
    assert_eq!(os.query_results, vec![false]);
    assert_eq!(os.subscribe_calls, 1);
    assert!(os.resize_listener.is_some());
}

#[test]
fn mount_picks_up_an_already_maximized_window() {
    let h = mounted(|os| os.maximized = true);
    assert!(h.controller.is_maximized());
    assert_eq!(
        maximize_icon(&h.controller.snapshot()),
        Some(MaximizeIcon::Restore)
    );
}

#[test]
fn mount_only_acquires_once() {
    let mut h = mounted(|_| {});
    h.pool.run_until(h.controller.mount());
    assert_eq!(h.acquisitions.get(), 1);
    assert_eq!(h.os.borrow().subscribe_calls, 1);
}

#[test]
fn listeners_see_placeholder_then_ready() {
    let mut h = harness(|_| {});
    let phases = Rc::new(RefCell::new(Vec::new()));
    let seen = phases.clone();
    h.controller.subscribe(move |snapshot| seen.borrow_mut().push(snapshot.phase));

    h.pool.run_until(h.controller.mount());

    assert_eq!(
        *phases.borrow(),
        vec![ChromePhase::Acquiring, ChromePhase::Ready]
    );
}

#[test]
fn toggle_switches_icon_without_intermediate_state() {
    let mut h = mounted(|os| os.maximized = false);
    let (release_toggle, gate) = oneshot::channel();
    h.os.borrow_mut().toggle_gates.push_back(gate);

    let icons = Rc::new(RefCell::new(Vec::new()));
    let seen = icons.clone();
    h.controller.subscribe(move |snapshot| {
        if let Some(icon) = maximize_icon(snapshot) {
            seen.borrow_mut().push(icon);
        }
    });

    let controller = &h.controller;
    h.pool.run_until(async {
        join!(controller.toggle_maximize(), async {
            // OS call still pending: nothing optimistic may show up.
            assert!(!controller.is_maximized());
            assert!(icons.borrow().is_empty());
            release_toggle.send(()).expect("toggle still waiting");
        });
    });

    assert!(h.controller.is_maximized());
    assert_eq!(*icons.borrow(), vec![MaximizeIcon::Restore]);
    let os = h.os.borrow();
    assert_eq!(os.toggle_calls, 1);
    assert_eq!(os.query_results, vec![false, true]);
}

#[test]
fn toggle_stores_queried_value_not_an_optimistic_flip() {
    let mut h = mounted(|os| {
        os.maximized = false;
        os.deny_toggle = true;
    });

    h.pool.run_until(h.controller.toggle_maximize());

    assert!(!h.controller.is_maximized());
    let os = h.os.borrow();
    assert_eq!(os.toggle_calls, 1);
    assert_eq!(os.query_results, vec![false, false]);
}

#[test]
fn actions_before_ready_are_noops() {
    let mut h = harness(|_| {});

    let controller = &h.controller;
    h.pool.run_until(async {
        controller.toggle_maximize().await;
        controller.minimize().await;
        controller.close().await;
    });

    assert_eq!(h.controller.phase(), ChromePhase::Uninitialized);
    assert!(!h.controller.is_maximized());
    let os = h.os.borrow();
    assert_eq!(os.toggle_calls, 0);
    assert_eq!(os.minimize_calls, 0);
    assert_eq!(os.close_calls, 0);
    assert!(os.query_results.is_empty());
}

#[test]
fn actions_while_acquiring_are_noops() {
    let (release_acquire, gate) = oneshot::channel();
    let mut h = harness_with(
        ProviderSetup {
            fail: false,
            gate: Some(gate),
        },
        |_| {},
    );

    let controller = &h.controller;
    let os = h.os.clone();
    h.pool.run_until(async {
        join!(controller.mount(), async {
            assert_eq!(controller.phase(), ChromePhase::Acquiring);
            controller.toggle_maximize().await;
            controller.minimize().await;
            controller.close().await;
            assert_eq!(os.borrow().toggle_calls, 0);
            release_acquire.send(()).expect("acquisition still waiting");
        });
    });

    assert_eq!(h.controller.phase(), ChromePhase::Ready);
    let os = h.os.borrow();
    assert_eq!(os.toggle_calls, 0);
    assert_eq!(os.minimize_calls, 0);
    assert_eq!(os.close_calls, 0);
}

#[test]
fn acquisition_failure_keeps_placeholder_forever() {
    let mut h = harness_with(
        ProviderSetup {
            fail: true,
            gate: None,
        },
        |_| {},
    );

    h.pool.run_until(h.controller.mount());
    assert_eq!(h.controller.phase(), ChromePhase::Acquiring);
    assert_eq!(
        title_bar_view(&TitleBarConfig::default(), &h.controller.snapshot()),
        TitleBarView::Placeholder
    );

    let controller = &h.controller;
    h.pool.run_until(async {
        controller.minimize().await;
        controller.close().await;
        controller.toggle_maximize().await;
        controller.mount().await;
    });

    assert_eq!(h.controller.phase(), ChromePhase::Acquiring);
    assert_eq!(h.acquisitions.get(), 1, "acquisition must not be retried");
    let os = h.os.borrow();
    assert_eq!(os.minimize_calls, 0);
    assert_eq!(os.close_calls, 0);
    assert_eq!(os.subscribe_calls, 0);
}

#[test]
fn every_resize_reconciles_with_a_fresh_query() {
    let mut h = mounted(|os| os.maximized = false);

    for value in [true, false, false, true, false, true] {
        h.os.borrow_mut().maximized = value;
        fire_resize(&h.os);
        h.pool.run_until_stalled();
        assert_eq!(h.controller.is_maximized(), value);
    }

    let os = h.os.borrow();
    assert_eq!(os.query_results.len(), 7);
    assert_eq!(h.controller.is_maximized(), *os.query_results.last().expect("queried at least once"));
}

#[test]
fn resize_bursts_issue_one_query_per_notification() {
    let mut h = mounted(|os| os.maximized = false);

    h.os.borrow_mut().maximized = true;
    for _ in 0..5 {
        fire_resize(&h.os);
    }
    h.pool.run_until_stalled();

    let os = h.os.borrow();
    assert_eq!(os.query_results.len(), 1 + 5);
    assert!(h.controller.is_maximized());
}

#[test]
fn last_resolved_resize_query_wins() {
    let mut h = mounted(|os| os.maximized = false);
    let (release_first, first_gate) = oneshot::channel();
    let (release_second, second_gate) = oneshot::channel();
    {
        let mut os = h.os.borrow_mut();
        os.query_gates.push_back(first_gate);
        os.query_gates.push_back(second_gate);
    }

    h.os.borrow_mut().maximized = true;
    fire_resize(&h.os);
    h.pool.run_until_stalled();
    h.os.borrow_mut().maximized = false;
    fire_resize(&h.os);
    h.pool.run_until_stalled();

    release_second.send(()).expect("second query waiting");
    h.pool.run_until_stalled();
    assert!(!h.controller.is_maximized());

    release_first.send(()).expect("first query waiting");
    h.pool.run_until_stalled();
    assert!(h.controller.is_maximized());

    let os = h.os.borrow();
    assert_eq!(os.query_results, vec![false, false, true]);
    assert_eq!(h.controller.is_maximized(), *os.query_results.last().expect("queried at least once"));
}

#[test]
fn unmount_cancels_resize_subscription_exactly_once() {
    let mut h = mounted(|_| {});
    h.controller.unmount();

    assert_eq!(h.controller.phase(), ChromePhase::Unmounted);
    assert_eq!(h.os.borrow().unsubscribe_calls, 1);
    assert!(h.os.borrow().resize_listener.is_none());

    // A notification the OS already had in flight.
    h.os.borrow_mut().maximized = true;
    let leaked = h.os.borrow().leaked_listener.clone();
    if let Some(listener) = leaked {
        listener();
    }
    h.pool.run_until_stalled();

    assert!(!h.controller.is_maximized());
    assert_eq!(h.os.borrow().query_results.len(), 1);

    h.controller.unmount();
    let Harness { os, controller, .. } = h;
    drop(controller);
    assert_eq!(os.borrow().unsubscribe_calls, 1);
}

#[test]
fn dropping_the_controller_unmounts() {
    let h = mounted(|_| {});
    let Harness { os, controller, .. } = h;
    drop(controller);
    assert_eq!(os.borrow().unsubscribe_calls, 1);
}

#[test]
fn unmount_during_acquisition_skips_subscription() {
    let (release_acquire, gate) = oneshot::channel();
    let mut h = harness_with(
        ProviderSetup {
            fail: false,
            gate: Some(gate),
        },
        |_| {},
    );

    let controller = &h.controller;
    h.pool.run_until(async {
        join!(controller.mount(), async {
            controller.unmount();
            release_acquire.send(()).expect("acquisition still waiting");
        });
    });

    assert_eq!(h.controller.phase(), ChromePhase::Unmounted);
    let os = h.os.borrow();
    assert_eq!(os.subscribe_calls, 0);
    assert!(os.query_results.is_empty());
}

#[test]
fn subscription_resolving_after_unmount_is_cancelled() {
    let (release_subscribe, gate) = oneshot::channel();
    let mut h = harness(|os| os.subscribe_gate = Some(gate));

    let controller = &h.controller;
    h.pool.run_until(async {
        join!(controller.mount(), async {
            assert_eq!(controller.phase(), ChromePhase::Ready);
            controller.unmount();
            release_subscribe.send(()).expect("subscription still waiting");
        });
    });

    let os = h.os.borrow();
    assert_eq!(os.subscribe_calls, 1);
    assert_eq!(os.unsubscribe_calls, 1);
    assert!(os.resize_listener.is_none());
}

#[test]
fn rapid_double_toggle_issues_both_calls() {
    let mut h = mounted(|os| os.maximized = false);
    let (release_first, first_gate) = oneshot::channel();
    let (release_second, second_gate) = oneshot::channel();
    {
        let mut os = h.os.borrow_mut();
        os.toggle_gates.push_back(first_gate);
        os.toggle_gates.push_back(second_gate);
    }

    let controller = &h.controller;
    let os = h.os.clone();
    h.pool.run_until(async {
        join!(controller.toggle_maximize(), controller.toggle_maximize(), async {
            assert_eq!(os.borrow().toggle_calls, 2);
            release_second.send(()).expect("second toggle waiting");
            release_first.send(()).expect("first toggle waiting");
        });
    });

    let os = h.os.borrow();
    assert_eq!(os.toggle_calls, 2);
    assert_eq!(os.query_results.len(), 3);
    assert!(!os.maximized);
    assert_eq!(h.controller.is_maximized(), *os.query_results.last().expect("queried at least once"));
}

#[test]
fn failed_actions_are_swallowed_and_leave_state_alone() {
    let mut h = mounted(|os| {
        os.maximized = false;
        os.fail_minimize = true;
        os.fail_toggle = true;
        os.fail_close = true;
    });

    let controller = &h.controller;
    h.pool.run_until(async {
        controller.minimize().await;
        controller.toggle_maximize().await;
        controller.close().await;
    });

    assert_eq!(h.controller.phase(), ChromePhase::Ready);
    assert!(!h.controller.is_maximized());
    let os = h.os.borrow();
    assert_eq!(os.minimize_calls, 1);
    assert_eq!(os.toggle_calls, 1);
    assert_eq!(os.close_calls, 1);
    assert_eq!(os.query_results.len(), 1, "no re-query after a rejected toggle");
}

#[test]
fn failed_requery_keeps_last_known_value() {
    let mut h = mounted(|os| os.maximized = false);
    h.os.borrow_mut().fail_query = true;

    h.pool.run_until(h.controller.toggle_maximize());

    assert!(h.os.borrow().maximized);
    assert!(!h.controller.is_maximized());

    fire_resize(&h.os);
    h.pool.run_until_stalled();
    assert!(!h.controller.is_maximized());

    h.os.borrow_mut().fail_query = false;
    fire_resize(&h.os);
    h.pool.run_until_stalled();
    assert!(h.controller.is_maximized());
}

#[test]
fn failed_seed_query_still_reaches_ready() {
    let h = mounted(|os| {
        os.maximized = true;
        os.fail_query = true;
    });

    assert!(!h.controller.is_maximized());
    assert_eq!(h.os.borrow().subscribe_calls, 1);
}

#[test]
fn failed_subscription_leaves_controls_usable() {
    let mut h = mounted(|os| os.fail_subscribe = true);

    h.pool.run_until(h.controller.toggle_maximize());

    assert!(h.controller.is_maximized());
    assert!(h.os.borrow().resize_listener.is_none());
    h.controller.unmount();
    assert_eq!(h.os.borrow().unsubscribe_calls, 0);
}

#[test]
fn hover_is_exclusive_and_works_in_any_phase() {
    let h = harness(|_| {});
    let notifications = Rc::new(Cell::new(0));
    let counter = notifications.clone();
    h.controller.subscribe(move |_| counter.set(counter.get() + 1));

    h.controller.set_hover(Some(WindowControl::Minimize));
    assert_eq!(h.controller.hovered(), Some(WindowControl::Minimize));

    h.controller.set_hover(Some(WindowControl::Close));
    assert_eq!(h.controller.hovered(), Some(WindowControl::Close));

    h.controller.set_hover(Some(WindowControl::Close));
    assert_eq!(notifications.get(), 2, "unchanged hover does not notify");

    h.controller.set_hover(None);
    assert_eq!(h.controller.hovered(), None);
    assert_eq!(notifications.get(), 3);
}

#[test]
fn unmount_clears_hover() {
    let h = mounted(|_| {});
    h.controller.set_hover(Some(WindowControl::Maximize));
    h.controller.unmount();
    assert_eq!(h.controller.hovered(), None);
}

#[test]
fn unsubscribed_listeners_stop_receiving() {
    let h = mounted(|_| {});
    let notifications = Rc::new(Cell::new(0));
    let counter = notifications.clone();
    let id = h
        .controller
        .subscribe(move |_| counter.set(counter.get() + 1));

    h.controller.set_hover(Some(WindowControl::Close));
    assert!(h.controller.unsubscribe(id));
    h.controller.set_hover(None);

    assert_eq!(notifications.get(), 1);
    assert!(!h.controller.unsubscribe(id));
}

#[test]
fn listeners_may_call_back_into_the_controller() {
    let h = Rc::new(mounted(|_| {}));
    let weak = Rc::downgrade(&h);
    h.controller.subscribe(move |snapshot| {
        if snapshot.hovered == Some(WindowControl::Close) {
            if let Some(h) = weak.upgrade() {
                h.controller.set_hover(None);
            }
        }
    });

    h.controller.set_hover(Some(WindowControl::Close));
    assert_eq!(h.controller.hovered(), None);
}

#[test]
fn controls_work_while_seed_query_is_pending() {
    let (release_seed, seed_gate) = oneshot::channel();
    let mut h = harness(|os| {
        os.maximized = false;
        os.query_gates.push_back(seed_gate);
    });

    let controller = &h.controller;
    let os = h.os.clone();
    h.pool.run_until(async {
        join!(controller.mount(), async {
            assert_eq!(controller.phase(), ChromePhase::Ready);
            assert_eq!(os.borrow().subscribe_calls, 1);

            controller.toggle_maximize().await;
            assert_eq!(os.borrow().toggle_calls, 1);
            assert!(controller.is_maximized());

            release_seed.send(()).expect("seed query still waiting");
        });
    });

    // The seed was issued before the toggle; its stale answer is dropped.
    assert!(h.controller.is_maximized());
    let os = h.os.borrow();
    assert_eq!(os.query_results, vec![true, false]);
    assert!(os.resize_listener.is_some());
}

#[test]
fn seed_answer_applies_when_nothing_newer_arrived() {
    let (release_seed, seed_gate) = oneshot::channel();
    let mut h = harness(|os| {
        os.maximized = true;
        os.query_gates.push_back(seed_gate);
    });

    let controller = &h.controller;
    h.pool.run_until(async {
        join!(controller.mount(), async {
            assert_eq!(controller.phase(), ChromePhase::Ready);
            assert!(!controller.is_maximized());
            release_seed.send(()).expect("seed query still waiting");
        });
    });

    assert!(h.controller.is_maximized());
}

#[test]
fn hover_is_ignored_after_unmount() {
    let h = mounted(|_| {});
    h.controller.unmount();

    h.controller.set_hover(Some(WindowControl::Close));

    assert_eq!(h.controller.hovered(), None);
}

#[test]
fn listener_removed_mid_dispatch_is_skipped() {
    let h = Rc::new(mounted(|_| {}));
    let second_id = Rc::new(Cell::new(None));
    let second_calls = Rc::new(Cell::new(0));

    let weak = Rc::downgrade(&h);
    let to_remove = second_id.clone();
    h.controller.subscribe(move |_| {
        if let (Some(h), Some(id)) = (weak.upgrade(), to_remove.get()) {
            h.controller.unsubscribe(id);
        }
    });
    let counter = second_calls.clone();
    let id = h
        .controller
        .subscribe(move |_| counter.set(counter.get() + 1));
    second_id.set(Some(id));

    h.controller.set_hover(Some(WindowControl::Minimize));

    assert_eq!(second_calls.get(), 0);
    assert!(!h.controller.unsubscribe(id));
}
