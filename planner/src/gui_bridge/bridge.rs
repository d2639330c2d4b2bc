use crate::generator::profile::{build_layout, LayoutProfile};
use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::runner::Runner;
use anyhow::Context;
use log::{info, warn};
use serde_json::json;
use std::{
    future::Future,
    net::SocketAddr,
    sync::{Arc, RwLock},
};
use uvcore::antenna::AntennaSet;
use warp::{
    http::StatusCode,
    reply::{Json, WithStatus},
    Filter,
};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

type SharedModel = Arc<RwLock<VisualizationModel>>;

/// Bridge that hosts the model endpoint and recomputes on incoming layouts.
pub struct GuiBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

fn recompute(
    state: &SharedModel,
    runner: &Runner,
    antennas: anyhow::Result<AntennaSet>,
) -> WithStatus<Json> {
    match antennas.and_then(|antennas| runner.execute(&antennas)) {
        Ok(result) => {
            if let Ok(mut guard) = state.write() {
                *guard = VisualizationModel::from(&result);
            }
            warp::reply::with_status(
                warp::reply::json(&json!({
                    "status": "ok",
                    "antennas": result.summary.antennas,
                    "unique_baselines": result.summary.unique_baselines,
                })),
                StatusCode::OK,
            )
        }
        Err(err) => {
            warn!("bridge recompute failed: {:#}", err);
            runner.metrics().record_error();
            warp::reply::with_status(
                warp::reply::json(&json!({
                    "status": "error",
                    "message": format!("{:#}", err),
                })),
                StatusCode::BAD_REQUEST,
            )
        }
    }
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("model")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let model = state
                    .read()
                    .map(|guard| guard.clone())
                    .unwrap_or_default();
                warp::reply::json(&model)
            });

        let antennas_route = warp::path("antennas")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .map(
                |antennas: AntennaSet, state: SharedModel, runner: Arc<Runner>| {
                    recompute(&state, &runner, Ok(antennas))
                },
            );

        let generate_route = warp::path("generate")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .map(
                |profile: LayoutProfile, state: SharedModel, runner: Arc<Runner>| {
                    recompute(&state, &runner, build_layout(&profile))
                },
            );

        get_route.or(antennas_route).or(generate_route)
    }

    /// Binds `address` and serves the routes until `shutdown` resolves.
    ///
    /// A port that cannot be bound is returned as an error instead of
    /// tearing down the caller.
    pub async fn serve_until<F>(&self, address: SocketAddr, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (bound, server) = warp::serve(self.routes())
            .try_bind_with_graceful_shutdown(address, shutdown)
            .with_context(|| format!("binding GUI bridge on {}", address))?;
        info!("GUI bridge listening on {}", bound);
        self.publish_status(&format!("HTTP bridge running on {} (Ctrl+C to stop)...", bound));
        server.await;
        Ok(())
    }

    pub fn publish(&self, model: &VisualizationModel) {
        if let Ok(mut guard) = self.state.write() {
            *guard = model.clone();
            println!(
                "[GUI] antennas: {}, u-v samples: {}",
                guard.antennas.len(),
                guard.samples.len()
            );
        }
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use uvcore::antenna::AntennaPosition;

    fn bridge() -> GuiBridge {
        GuiBridge::new(Arc::new(Runner::new(WorkflowConfig::default())))
    }

    #[test]
    fn publish_updates_state() {
        let gui = bridge();
        let antennas: AntennaSet = [(0.0, 0.0), (2.0, 0.0)]
            .into_iter()
            .map(AntennaPosition::from)
            .collect();
        let result = gui.runner.execute(&antennas).unwrap();
        gui.publish(&VisualizationModel::from(&result));
        assert_eq!(gui.snapshot().samples.len(), 3);
    }

    #[tokio::test]
    async fn posted_antennas_are_analyzed() {
        let gui = bridge();
        let routes = gui.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/antennas")
            .json(&json!([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = warp::test::request()
            .method("GET")
            .path("/model")
            .reply(&routes)
            .await;
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(model.samples.len(), 7);
        assert_eq!(model.samples[0].multiplicity, 3);
        assert_eq!(model.summary.unwrap().total_pairs, 9);
    }

    #[tokio::test]
    async fn antennas_beyond_layout_range_are_a_bad_request() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/antennas")
            .json(&json!([[0.0, 0.0], [1e13, 0.0]]))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(gui.runner.metrics().snapshot().errors, 1);
    }

    #[tokio::test]
    async fn occupied_port_is_reported_as_an_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = taken.local_addr().unwrap();
        let err = bridge().serve_until(address, async {}).await.unwrap_err();
        assert!(format!("{:#}", err).contains("binding GUI bridge"));
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown_signal() {
        let address = SocketAddr::from(([127, 0, 0, 1], 0));
        bridge().serve_until(address, async {}).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_profile_is_a_bad_request() {
        let gui = bridge();
        let routes = gui.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/generate")
            .json(&json!({"kind": "grid", "rows": 2, "cols": 2, "spacing": -1.0}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(gui.snapshot().antennas.is_empty());
        assert_eq!(gui.runner.metrics().snapshot().errors, 1);
    }
}
