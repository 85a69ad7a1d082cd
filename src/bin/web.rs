//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//! Roster/config files: PLAYERS_FILE (default players.json), CONFIG_FILE (default config.json).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_americano_web::{
    coerce_points, compute_scoring, fallback_roster, generate_fixture, normalize_roster,
    FixtureConfig, Match, MatchKey, PlayerId, Scoreboard, Side,
};
use serde::Deserialize;
use std::sync::RwLock;

/// All server state: the current roster/config, the fixture derived from them,
/// and the mutable scoreboard. The fixture is regenerated wholesale whenever
/// roster or config change; scoring is recomputed on every leaderboard request.
struct AppData {
    roster: Vec<PlayerId>,
    config: FixtureConfig,
    fixture: Vec<Match>,
    scoreboard: Scoreboard,
}

type AppState = Data<RwLock<AppData>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RosterBody {
    players: Vec<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    side: Side,
    /// Raw user input: numbers pass through, anything non-numeric counts as 0.
    value: serde_json::Value,
}

#[derive(Deserialize)]
struct PointsBody {
    value: serde_json::Value,
}

/// Path segments: match identity (e.g. /api/score/{round}/{slot}/{venue})
#[derive(Deserialize)]
struct ScorePath {
    round: u32,
    slot: u32,
    venue: String,
}

/// Path segment: player name (e.g. /api/points/{player})
#[derive(Deserialize)]
struct PlayerPath {
    player: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-americano-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Full current state: roster, config, fixture, scoreboard.
#[get("/api/state")]
async fn api_get_state(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "roster": g.roster,
        "config": g.config,
        "fixture": g.fixture,
        "scoreboard": g.scoreboard,
    }))
}

/// Replace the roster. Regenerates the fixture, drops recorded scores, keeps
/// manual points for players still on the roster.
#[put("/api/roster")]
async fn api_set_roster(state: AppState, body: Json<RosterBody>) -> HttpResponse {
    let roster = normalize_roster(&body.players);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let fixture = match generate_fixture(&roster, &g.config) {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    g.roster = roster;
    g.fixture = fixture;
    let roster = g.roster.clone();
    g.scoreboard.rebuild_for_roster(&roster);
    HttpResponse::Ok().json(serde_json::json!({
        "roster": g.roster,
        "fixture": g.fixture,
    }))
}

/// Replace the configuration. Regenerates the fixture and drops recorded scores.
#[put("/api/config")]
async fn api_set_config(state: AppState, body: Json<FixtureConfig>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let fixture = match generate_fixture(&g.roster, &body) {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    g.config = body.into_inner();
    g.fixture = fixture;
    g.scoreboard.matches.clear();
    HttpResponse::Ok().json(serde_json::json!({
        "config": g.config,
        "fixture": g.fixture,
    }))
}

/// Record one side's score for a match. Non-numeric input counts as 0; values
/// are clamped into [0, 32]. The key must belong to the current fixture.
#[put("/api/score/{round}/{slot}/{venue}")]
async fn api_record_score(state: AppState, path: Path<ScorePath>, body: Json<ScoreBody>) -> HttpResponse {
    let key = MatchKey::new(path.round, path.slot, path.venue.clone());
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.fixture.iter().any(|m| m.key() == key) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Match not found" }));
    }
    let value = coerce_points(&body.value);
    g.scoreboard.record_score(key.clone(), body.side, value);
    let score = g.scoreboard.matches[&key];
    HttpResponse::Ok().json(serde_json::json!({ "key": key, "score": score }))
}

/// Set a player's manual point adjustment (may be negative; non-numeric counts as 0).
#[put("/api/points/{player}")]
async fn api_set_points(state: AppState, path: Path<PlayerPath>, body: Json<PointsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.roster.contains(&path.player) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Player not found" }));
    }
    let value = coerce_points(&body.value);
    g.scoreboard.set_manual_points(path.player.clone(), value);
    HttpResponse::Ok().json(serde_json::json!({ "player": path.player, "value": value }))
}

/// Leaderboard and opponent-diversity report, recomputed per request.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let report = compute_scoring(&g.roster, &g.fixture, &g.scoreboard.matches, &g.scoreboard.points);
    HttpResponse::Ok().json(report)
}

/// Zero manual points and clear all recorded scores.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let roster = g.roster.clone();
    g.scoreboard.reset(&roster);
    HttpResponse::Ok().json(&g.scoreboard)
}

/// Download the scoreboard as the `{points, matches}` interchange document.
#[get("/api/export")]
async fn api_export(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let filename = format!("americano-score-{}.json", chrono::Utc::now().format("%Y-%m-%d"));
    HttpResponse::Ok()
        .content_type("application/json")
        .insert_header(("Content-Disposition", format!("attachment; filename=\"{}\"", filename)))
        .json(&g.scoreboard)
}

/// Import a previously exported document. The body is validated as a whole
/// before anything is applied; a malformed document leaves state untouched.
#[post("/api/import")]
async fn api_import(state: AppState, body: Json<Scoreboard>) -> HttpResponse {
    let mut incoming = body.into_inner();
    incoming.clamp_all();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.scoreboard = incoming;
    HttpResponse::Ok().json(&g.scoreboard)
}

/// Load the roster with the configured precedence: PLAYERS_FILE / players.json,
/// falling back to the built-in list on any failure. Runtime PUT /api/roster
/// overrides either.
fn load_roster() -> Vec<PlayerId> {
    let path = std::env::var("PLAYERS_FILE").unwrap_or_else(|_| "players.json".to_string());
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<Vec<String>>(&text) {
            Ok(list) => {
                let roster = normalize_roster(&list);
                if roster.is_empty() {
                    log::warn!("{} contains no usable players; using built-in roster", path);
                    fallback_roster()
                } else {
                    log::info!("Loaded {} player(s) from {}", roster.len(), path);
                    roster
                }
            }
            Err(e) => {
                log::warn!("Could not parse {}: {}; using built-in roster", path, e);
                fallback_roster()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}; using built-in roster", path, e);
            fallback_roster()
        }
    }
}

/// Load the fixture configuration from CONFIG_FILE / config.json, falling back
/// to the defaults (5 rounds, 3 slots, 2 courts) on any failure.
fn load_config() -> FixtureConfig {
    let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.json".to_string());
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str::<FixtureConfig>(&text) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    log::info!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    log::warn!("{} is invalid: {}; using default configuration", path, e);
                    FixtureConfig::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse {}: {}; using default configuration", path, e);
                FixtureConfig::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}; using default configuration", path, e);
            FixtureConfig::default()
        }
    }
}

/// Build the initial state. If the loaded roster/config cannot produce a
/// fixture (e.g. a players file with 3 names), fall back to the built-ins so
/// the server always starts with a usable schedule.
fn initial_state() -> AppData {
    let mut roster = load_roster();
    let mut config = load_config();
    let fixture = match generate_fixture(&roster, &config) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("Cannot generate fixture from loaded state: {}; using built-ins", e);
            roster = fallback_roster();
            config = FixtureConfig::default();
            generate_fixture(&roster, &config).unwrap_or_default()
        }
    };
    let mut scoreboard = Scoreboard::default();
    scoreboard.reset(&roster);
    AppData {
        roster,
        config,
        fixture,
        scoreboard,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let data = initial_state();
    log::info!(
        "Fixture: {} round(s) x {} slot(s) x {} venue(s), {} player(s), {} match(es)",
        data.config.rounds,
        data.config.slots_per_round,
        data.config.venues.len(),
        data.roster.len(),
        data.fixture.len()
    );
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(data));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_state)
            .service(api_set_roster)
            .service(api_set_config)
            .service(api_record_score)
            .service(api_set_points)
            .service(api_leaderboard)
            .service(api_reset)
            .service(api_export)
            .service(api_import)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
