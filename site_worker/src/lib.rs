use proto::{PingResponse, PING_PATH};
use worker::*;

/// Used when the `ALLOWED_ORIGINS` variable is not set
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: worker::Context) -> Result<Response> {
    console_log!("{:?} {}", req.method(), req.path());

    Router::new()
        .get("/", handle_index)
        .get(PING_PATH, handle_ping)
        .options(PING_PATH, handle_preflight)
        .run(req, env)
        .await
}

fn handle_index(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    Response::from_html(INDEX_HTML)
}

fn handle_ping(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let response = Response::from_json(&PingResponse::pong()).map_err(|e| {
        console_error!("Failed to encode ping response: {:?}", e);
        e
    })?;
    with_cors(response, &req, &ctx)
}

fn handle_preflight(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    with_cors(Response::empty()?.with_status(204), &req, &ctx)
}

/// Attach CORS headers when the request's origin is on the allow list
fn with_cors(response: Response, req: &Request, ctx: &RouteContext<()>) -> Result<Response> {
    let configured = ctx
        .var("ALLOWED_ORIGINS")
        .map(|v| v.to_string())
        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
    let allowed = parse_allowed_origins(&configured);
    let origin = req.headers().get("Origin")?;

    match origin.as_deref().and_then(|o| matching_origin(o, &allowed)) {
        Some(origin) => {
            let cors = Cors::new()
                .with_origins([origin])
                .with_credentials(true)
                .with_methods(Method::all())
                .with_allowed_headers(["*"]);
            response.with_cors(&cors)
        }
        None => {
            if let Some(origin) = origin {
                console_log!("CORS: origin {} not allowed", origin);
            }
            Ok(response)
        }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The origin to echo back, if it is allowed
pub fn matching_origin(origin: &str, allowed: &[String]) -> Option<String> {
    let origin = origin.trim_end_matches('/');
    allowed
        .iter()
        .find(|a| a.as_str() == "*" || a.as_str() == origin)
        .map(|_| origin.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Pong</title>
    <style>
        body { margin: 0; padding: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; background: #282c34; color: #fff; font-family: monospace; }
        #canvas { border: 2px solid white; border-radius: 4px; max-width: 100%; touch-action: none; }
        .hidden { display: none !important; }
        #menu, #gameOver { display: flex; flex-direction: column; align-items: center; gap: 12px; }
        #gameOver { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); background: rgba(0, 0, 0, 0.8); padding: 24px 48px; border-radius: 8px; }
        button { padding: 8px 16px; margin: 4px; font-family: monospace; font-size: 16px; background: #4a9eff; color: white; border: none; border-radius: 4px; cursor: pointer; }
        button:hover { background: #5aaeff; }
        button.active { background: #fff; color: #000; }
        #message { margin-top: 10px; font-size: 12px; color: #888; }
    </style>
</head>
<body>
    <h1>Pong Game</h1>
    <div id="menu">
        <button id="playBtn">PLAY</button>
        <h2 id="difficultyLabel">Difficulty:</h2>
        <div id="difficultyButtons"></div>
    </div>
    <div id="game" class="hidden">
        <canvas id="canvas" width="1200" height="600"></canvas>
        <div id="gameOver" class="hidden">
            <h2 id="winnerText"></h2>
            <button id="menuBtn">Back to Menu</button>
        </div>
    </div>
    <p>Use your mouse or touch to move the left paddle</p>
    <p id="message">Message from backend: </p>
    <script type="module">
        import init, { init_game, difficulty_names, selected_difficulty, select_difficulty, start_game, return_to_menu, set_state_listener, probe_backend } from './pkg/client_wasm.js';

        const names = [];

        async function main() {
            try {
                await init();
                init_game(document.getElementById('canvas'));
                names.push(...difficulty_names());
                buildDifficultyButtons();
                set_state_listener(onStateChange);
                document.getElementById('playBtn').onclick = () => {
                    try { start_game(); } catch (e) { console.error('Start error:', e); }
                };
                document.getElementById('menuBtn').onclick = () => return_to_menu();
                const message = await probe_backend(window.location.origin);
                document.getElementById('message').textContent = 'Message from backend: ' + message;
            } catch (error) {
                console.error('Error:', error);
            }
        }

        function buildDifficultyButtons() {
            const container = document.getElementById('difficultyButtons');
            names.forEach((name, index) => {
                const btn = document.createElement('button');
                btn.textContent = name;
                btn.onclick = () => { select_difficulty(index); refreshDifficulty(); };
                container.appendChild(btn);
            });
            refreshDifficulty();
        }

        function refreshDifficulty() {
            const current = selected_difficulty();
            document.getElementById('difficultyLabel').textContent = 'Difficulty: ' + names[current];
            document.querySelectorAll('#difficultyButtons button').forEach((btn, i) => {
                btn.classList.toggle('active', i === current);
            });
        }

        function onStateChange(state, winner) {
            document.getElementById('menu').classList.toggle('hidden', state !== 'menu');
            document.getElementById('game').classList.toggle('hidden', state === 'menu');
            document.getElementById('gameOver').classList.toggle('hidden', state !== 'ended');
            if (state === 'ended') {
                document.getElementById('winnerText').textContent = winner + ' Wins!';
            }
            if (state === 'menu') refreshDifficulty();
        }

        main();
    </script>
</body>
</html>"#;
