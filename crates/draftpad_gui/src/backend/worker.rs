//! Background worker thread for HTTP access to the content API.

use crate::backend::{CoreCmd, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use draftpad_core::constants::FEATURE_PAGE_ATTRIBUTES;
use draftpad_core::models::post::Post;
use draftpad_core::models::post_type::PostTypeResponse;
use std::thread;
use tracing::{debug, error};

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Build a handle around externally owned channels.
    ///
    /// Used by headless tests that intercept commands instead of running the
    /// worker thread.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Spawn the backend worker thread that performs blocking HTTP requests.
///
/// All network I/O stays off the UI thread; the worker replies with
/// [`CoreEvent`] values that are polled each frame.
///
/// # Arguments
/// - `api_base`: Base URL of the content API, e.g. `http://127.0.0.1:38422`.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(api_base: String) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("draftpad-gui-backend".to_string())
        .spawn(move || {
            // No request timeout: capability probes are aborted through
            // their ticket rather than timed out.
            let client = reqwest::blocking::Client::builder()
                .timeout(None)
                .build()
                .expect("build http client");
            for cmd in cmd_rx.iter() {
                match cmd {
                    CoreCmd::FetchTypeSupports { slug, request } => {
                        if request.is_cancelled() {
                            continue;
                        }
                        let url = format!("{}/api/types/{}", api_base, slug);
                        let fetched = client
                            .get(&url)
                            .query(&[("context", "edit")])
                            .send()
                            .and_then(|resp| resp.error_for_status())
                            .and_then(|resp| resp.json::<PostTypeResponse>());
                        match fetched {
                            Ok(post_type) => {
                                if request.is_cancelled() {
                                    continue;
                                }
                                let _ = evt_tx.send(CoreEvent::TypeSupportsLoaded {
                                    slug,
                                    request_id: request.id(),
                                    supports_page_attributes: post_type
                                        .feature_enabled(FEATURE_PAGE_ATTRIBUTES),
                                });
                            }
                            Err(err) => {
                                // Capability probes fail silently; the panel
                                // simply never appears for this mount.
                                debug!("capability fetch for '{}' failed: {}", slug, err);
                            }
                        }
                    }
                    CoreCmd::LoadPost { id } => {
                        let url = format!("{}/api/post/{}", api_base, id);
                        match client.get(&url).send() {
                            Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => {
                                let _ = evt_tx.send(CoreEvent::PostMissing { id });
                            }
                            Ok(resp) => match resp.error_for_status().and_then(|r| r.json::<Post>())
                            {
                                Ok(post) => {
                                    let _ = evt_tx.send(CoreEvent::PostLoaded { post });
                                }
                                Err(err) => {
                                    error!("backend load failed: {}", err);
                                    let _ = evt_tx.send(CoreEvent::Error {
                                        message: format!("Load failed: {}", err),
                                    });
                                }
                            },
                            Err(err) => {
                                error!("backend load failed: {}", err);
                                let _ = evt_tx.send(CoreEvent::Error {
                                    message: format!("Load failed: {}", err),
                                });
                            }
                        }
                    }
                    CoreCmd::SavePost { id, update } => {
                        let url = format!("{}/api/post/{}", api_base, id);
                        match client.put(&url).json(&update).send() {
                            Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => {
                                let _ = evt_tx.send(CoreEvent::PostMissing { id });
                            }
                            Ok(resp) => match resp.error_for_status().and_then(|r| r.json::<Post>())
                            {
                                Ok(post) => {
                                    let _ = evt_tx.send(CoreEvent::PostSaved { post });
                                }
                                Err(err) => {
                                    error!("backend save failed: {}", err);
                                    let _ = evt_tx.send(CoreEvent::Error {
                                        message: format!("Save failed: {}", err),
                                    });
                                }
                            },
                            Err(err) => {
                                error!("backend save failed: {}", err);
                                let _ = evt_tx.send(CoreEvent::Error {
                                    message: format!("Save failed: {}", err),
                                });
                            }
                        }
                    }
                }
            }
        })
        .expect("spawn backend thread");

    BackendHandle { cmd_tx, evt_rx }
}
