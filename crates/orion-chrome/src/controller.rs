//! Window chrome controller.
//!
//! Owns the acquired window handle,
//! caches the OS maximize state, and
//! forwards minimize/toggle/close
//! requests. All state lives on one
//! thread; OS calls are awaited, never
//! blocked on.
//!
//! Failures to talk to the window are
//! logged and swallowed: a broken title
//! bar must not take the view below it
//! down.

use std::cell::RefCell;
use std::rc::{
  Rc,
  Weak
};

use futures::future::join;
use futures::task::{
  LocalSpawn,
  LocalSpawnExt
};
use tracing::{
  debug,
  error,
  info,
  instrument,
  warn
};

use crate::error::WindowAction;
use crate::window::{
  ResizeCallback,
  ResizeSubscription,
  WindowHandle,
  WindowProvider
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ChromePhase {
  Uninitialized,
  Acquiring,
  Ready,
  Unmounted
}

/// Interactive title bar controls.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum WindowControl {
  Minimize,
  Maximize,
  Close
}

/// Read-only view of the controller
/// handed to listeners.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ChromeSnapshot {
  pub phase:        ChromePhase,
  pub is_maximized: bool,
  pub hovered:      Option<WindowControl>
}

impl ChromeSnapshot {
  pub fn is_ready(&self) -> bool {
    self.phase == ChromePhase::Ready
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&ChromeSnapshot)>;

struct ChromeState<H> {
  phase:         ChromePhase,
  handle:        Option<Rc<H>>,
  is_maximized:  bool,
  hovered:       Option<WindowControl>,
  subscription:  Option<ResizeSubscription>,
  listeners:     Vec<(ListenerId, Listener)>,
  next_listener: u64,
  /// Bumped on every applied maximize
  /// query result.
  maximize_revision: u64
}

impl<H> ChromeState<H> {
  fn snapshot(&self) -> ChromeSnapshot {
    ChromeSnapshot {
      phase:        self.phase,
      is_maximized: self.is_maximized,
      hovered:      self.hovered
    }
  }
}

type SharedState<H> =
  Rc<RefCell<ChromeState<H>>>;

pub struct ChromeController<
  P: WindowProvider
> {
  provider: P,
  spawner:  Rc<dyn LocalSpawn>,
  state:    SharedState<P::Handle>
}

impl<P: WindowProvider> ChromeController<P> {
  /// `spawner` runs the maximize queries
  /// triggered by resize notifications.
  pub fn new(
    provider: P,
    spawner: impl LocalSpawn + 'static
  ) -> Self {
    Self {
      provider,
      spawner: Rc::new(spawner),
      state: Rc::new(RefCell::new(
        ChromeState {
          phase:         ChromePhase::Uninitialized,
          handle:        None,
          is_maximized:  false,
          hovered:       None,
          subscription:  None,
          listeners:     Vec::new(),
          next_listener: 0,
          maximize_revision: 0
        }
      ))
    }
  }

  pub fn snapshot(&self) -> ChromeSnapshot {
    self.state.borrow().snapshot()
  }

  pub fn phase(&self) -> ChromePhase {
    self.state.borrow().phase
  }

  pub fn is_maximized(&self) -> bool {
    self.state.borrow().is_maximized
  }

  pub fn hovered(
    &self
  ) -> Option<WindowControl> {
    self.state.borrow().hovered
  }

  /// Registers `listener` for every
  /// subsequent state change.
  pub fn subscribe(
    &self,
    listener: impl Fn(&ChromeSnapshot)
    + 'static
  ) -> ListenerId {
    let mut state =
      self.state.borrow_mut();
    let id =
      ListenerId(state.next_listener);
    state.next_listener += 1;
    state
      .listeners
      .push((id, Rc::new(listener)));
    id
  }

  pub fn unsubscribe(
    &self,
    id: ListenerId
  ) -> bool {
    let mut state =
      self.state.borrow_mut();
    let before = state.listeners.len();
    state
      .listeners
      .retain(|(existing, _)| {
        *existing != id
      });
    state.listeners.len() != before
  }

  /// Acquires the window handle, enters
  /// `Ready`, then seeds the maximize
  /// state and subscribes to resize
  /// notifications. Only the first call
  /// does anything.
  #[instrument(skip(self))]
  pub async fn mount(&self) {
    {
      let mut state =
        self.state.borrow_mut();
      if state.phase
        != ChromePhase::Uninitialized
      {
        debug!(
          phase = ?state.phase,
          "chrome already mounted; \
           ignoring"
        );
        return;
      }
      state.phase =
        ChromePhase::Acquiring;
    }
    notify_listeners(&self.state);

    let handle = match self
      .provider
      .current()
      .await
    {
      | Ok(handle) => Rc::new(handle),
      | Err(err) => {
        error!(
          error = %err,
          "failed to initialize window \
           chrome; keeping placeholder"
        );
        return;
      }
    };

    let revision = {
      let mut state =
        self.state.borrow_mut();
      if state.phase
        == ChromePhase::Unmounted
      {
        debug!(
          "window handle resolved after \
           unmount; discarding"
        );
        return;
      }
      state.handle = Some(handle.clone());
      state.phase = ChromePhase::Ready;
      info!("window chrome ready");
      state.maximize_revision
    };
    notify_listeners(&self.state);

    // Seed query and resize subscription
    // run concurrently.
    let seed = async {
      match handle.is_maximized().await {
        | Ok(maximized) => {
          apply_seed(
            &self.state,
            maximized,
            revision
          );
        }
        | Err(err) => {
          error!(
            action = %WindowAction::QueryMaximized,
            error = %err,
            "failed to seed maximize \
             state"
          );
        }
      }
    };

    let callback =
      self.resize_callback(&handle);
    let subscribe = async {
      match handle.on_resized(callback).await
      {
        | Ok(subscription) => {
          let mut state =
            self.state.borrow_mut();
          if state.phase
            == ChromePhase::Ready
          {
            state.subscription =
              Some(subscription);
          } else {
            drop(state);
            debug!(
              "resize subscription \
               resolved after unmount; \
               cancelling"
            );
            subscription.cancel();
          }
        }
        | Err(err) => {
          error!(
            action = %WindowAction::SubscribeResize,
            error = %err,
            "failed to listen for window \
             resizes"
          );
        }
      }
    };

    join(seed, subscribe).await;
  }

  /// Releases the handle and cancels the
  /// resize subscription. Safe to call
  /// from any phase; later calls are
  /// no-ops.
  #[instrument(skip(self))]
  pub fn unmount(&self) {
    let subscription = {
      let mut state =
        self.state.borrow_mut();
      if state.phase
        == ChromePhase::Unmounted
      {
        return;
      }
      state.phase = ChromePhase::Unmounted;
      state.handle = None;
      state.hovered = None;
      state.subscription.take()
    };

    if let Some(subscription) =
      subscription
    {
      subscription.cancel();
    }
    debug!("window chrome unmounted");

    notify_listeners(&self.state);
    self.state.borrow_mut().listeners.clear();
  }

  #[instrument(skip(self))]
  pub async fn minimize(&self) {
    let Some(handle) = self
      .ready_handle(WindowAction::Minimize)
    else {
      return;
    };
    match handle.minimize().await {
      | Ok(()) => debug!("window minimized"),
      | Err(err) => {
        error!(
          action = %WindowAction::Minimize,
          error = %err,
          "window action failed"
        );
      }
    }
  }

  /// Requests a maximize toggle, then
  /// stores whatever the OS reports
  /// afterwards.
  #[instrument(skip(self))]
  pub async fn toggle_maximize(&self) {
    let Some(handle) = self.ready_handle(
      WindowAction::ToggleMaximize
    ) else {
      return;
    };

    if let Err(err) =
      handle.toggle_maximize().await
    {
      error!(
        action = %WindowAction::ToggleMaximize,
        error = %err,
        "window action failed"
      );
      return;
    }

    match handle.is_maximized().await {
      | Ok(maximized) => {
        debug!(
          is_maximized = maximized,
          "window maximize toggled"
        );
        apply_maximized(
          &self.state,
          maximized
        );
      }
      | Err(err) => {
        error!(
          action = %WindowAction::QueryMaximized,
          error = %err,
          "failed to re-query maximize \
           state after toggle"
        );
      }
    }
  }

  #[instrument(skip(self))]
  pub async fn close(&self) {
    let Some(handle) =
      self.ready_handle(WindowAction::Close)
    else {
      return;
    };
    match handle.close().await {
      | Ok(()) => debug!("window closed"),
      | Err(err) => {
        error!(
          action = %WindowAction::Close,
          error = %err,
          "window action failed"
        );
      }
    }
  }

  /// Pass `None` when the pointer leaves
  /// a control.
  pub fn set_hover(
    &self,
    control: Option<WindowControl>
  ) {
    {
      let mut state =
        self.state.borrow_mut();
      if state.phase
        == ChromePhase::Unmounted
        || state.hovered == control
      {
        return;
      }
      state.hovered = control;
    }
    notify_listeners(&self.state);
  }

  fn ready_handle(
    &self,
    action: WindowAction
  ) -> Option<Rc<P::Handle>> {
    let state = self.state.borrow();
    match (&state.phase, &state.handle) {
      | (
        ChromePhase::Ready,
        Some(handle)
      ) => Some(handle.clone()),
      | (phase, _) => {
        debug!(
          %action,
          ?phase,
          "window handle not ready; \
           ignoring action"
        );
        None
      }
    }
  }

  fn resize_callback(
    &self,
    handle: &Rc<P::Handle>
  ) -> ResizeCallback {
    let state = Rc::downgrade(&self.state);
    let handle = Rc::downgrade(handle);
    let spawner = self.spawner.clone();

    Box::new(move || {
      reconcile_on_resize(
        &state, &handle, &*spawner
      );
    })
  }
}

impl<P: WindowProvider> Drop
  for ChromeController<P>
{
  fn drop(&mut self) {
    self.unmount();
  }
}

fn reconcile_on_resize<H: WindowHandle>(
  state: &Weak<RefCell<ChromeState<H>>>,
  handle: &Weak<H>,
  spawner: &dyn LocalSpawn
) {
  let Some(strong) = state.upgrade()
  else {
    return;
  };
  if strong.borrow().phase
    != ChromePhase::Ready
  {
    return;
  }
  let Some(handle) = handle.upgrade()
  else {
    return;
  };

  let state = Rc::downgrade(&strong);
  let query = async move {
    match handle.is_maximized().await {
      | Ok(maximized) => {
        if let Some(state) =
          state.upgrade()
        {
          apply_maximized(
            &state, maximized
          );
        }
      }
      | Err(err) => {
        warn!(
          action = %WindowAction::QueryMaximized,
          error = %err,
          "failed to reconcile maximize \
           state after resize"
        );
      }
    }
  };

  if let Err(err) =
    spawner.spawn_local(query)
  {
    error!(
      error = %err,
      "failed to schedule resize \
       reconciliation"
    );
  }
}

/// Overwrites the cached maximize flag
/// with a freshly queried value. Results
/// arriving after unmount are dropped.
fn apply_maximized<H>(
  state: &RefCell<ChromeState<H>>,
  maximized: bool
) {
  {
    let mut state = state.borrow_mut();
    if state.phase != ChromePhase::Ready
    {
      return;
    }
    state.maximize_revision += 1;
    if state.is_maximized == maximized {
      return;
    }
    state.is_maximized = maximized;
  }
  notify_listeners(state);
}

/// The seed query loses to any query that
/// resolved while it was in flight.
fn apply_seed<H>(
  state: &RefCell<ChromeState<H>>,
  maximized: bool,
  revision: u64
) {
  if state.borrow().maximize_revision
    != revision
  {
    debug!(
      "newer maximize state already \
       applied; dropping seed"
    );
    return;
  }
  apply_maximized(state, maximized);
}

fn notify_listeners<H>(
  state: &RefCell<ChromeState<H>>
) {
  let (snapshot, listeners) = {
    let state = state.borrow();
    let listeners: Vec<(ListenerId, Listener)> =
      state.listeners.clone();
    (state.snapshot(), listeners)
  };

  for (id, listener) in listeners {
    // An earlier listener may have
    // unsubscribed this one.
    let still_registered = state
      .borrow()
      .listeners
      .iter()
      .any(|(existing, _)| *existing == id);
    if still_registered {
      listener(&snapshot);
    }
  }
}
