// Request routing and endpoint handlers.
//
// `handle` is a pure function from request to response so every endpoint can
// be tested without opening a socket. Engine errors are client errors (400);
// a body that does not deserialize is 422.

use harmony::{
    catalog, generate_with_spelling, quick_harmony, HarmonyError, HarmonyMode, Spelling,
};

use crate::cors::CorsPolicy;
use crate::http::{Request, Response};
use crate::schema::{
    HarmonyRequest, HarmonyResponse, HarmonyTypesResponse, HealthResponse, QuickHarmonyResponse,
    WelcomeResponse, API_VERSION,
};

/// Methods each known path answers, as sent in `Allow`
fn allowed_methods(path: &str) -> Option<&'static str> {
    match path {
        "/" | "/health" | "/harmony-types" => Some("GET, HEAD, OPTIONS"),
        "/generate-harmony" | "/quick-harmony" => Some("POST, OPTIONS"),
        _ => None,
    }
}

/// Answer one request, including CORS headers.
pub fn handle(request: &Request, cors: &CorsPolicy) -> Response {
    let origin = request.header("origin");

    if request.method == "OPTIONS" {
        if let (Some(origin), Some(_)) = (origin, request.header("access-control-request-method")) {
            return match cors.preflight_headers(origin, request.header("access-control-request-headers")) {
                Some(headers) => Response::empty(204).with_headers(headers),
                None => Response::error(400, "Disallowed CORS origin"),
            };
        }
    }

    route(request).with_headers(cors.response_headers(origin))
}

fn route(request: &Request) -> Response {
    // HEAD is routed as GET; the body is dropped when the response is sent.
    let method = match request.method.as_str() {
        "HEAD" => "GET",
        other => other,
    };
    match (method, request.path.as_str()) {
        ("GET", "/") => root(),
        ("GET", "/health") => Response::json(200, &HealthResponse { status: "healthy" }),
        ("GET", "/harmony-types") => Response::json(
            200,
            &HarmonyTypesResponse {
                harmony_types: catalog(),
            },
        ),
        ("POST", "/generate-harmony") => generate_harmony(&request.body),
        ("POST", "/quick-harmony") => quick(request),
        (method, path) => match allowed_methods(path) {
            Some(allow) if method == "OPTIONS" => Response::empty(204).with_headers(allow_header(allow)),
            Some(allow) => Response::error(405, "Method Not Allowed").with_headers(allow_header(allow)),
            None => Response::error(404, "Not Found"),
        },
    }
}

fn allow_header(allow: &str) -> Vec<(String, String)> {
    vec![("Allow".to_string(), allow.to_string())]
}

fn root() -> Response {
    Response::json(
        200,
        &WelcomeResponse {
            message: "Welcome to Harmony Helper API",
            version: API_VERSION,
            harmony_types: HarmonyMode::valid_tags(),
        },
    )
}

fn generate_harmony(body: &[u8]) -> Response {
    let request: HarmonyRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => return Response::error(422, &format!("Invalid request body: {}", e)),
    };

    let mode = match request.harmony_type.parse::<HarmonyMode>() {
        Ok(mode) => mode,
        Err(e) => return error_response(e),
    };

    match generate_with_spelling(&request.melody, mode, request.spelling) {
        Ok(harmony) => {
            if !harmony.skipped.is_empty() {
                log::info!(
                    "{} of {} melody notes skipped for {} harmony",
                    harmony.skipped.len(),
                    request.melody.len(),
                    mode
                );
            }
            Response::json(
                200,
                &HarmonyResponse::new(request.melody, harmony.notes, request.harmony_type),
            )
        }
        Err(e) => error_response(e),
    }
}

fn quick(request: &Request) -> Response {
    let pitch = request.query_param("pitch").unwrap_or("C4");
    let harmony_type = request.query_param("harmony_type").unwrap_or("third");
    let spelling = match request.query_param("spelling") {
        None | Some("sharps") => Spelling::Sharps,
        Some("flats") => Spelling::Flats,
        Some(other) => {
            return Response::error(422, &format!("Invalid spelling: {}. Valid spellings: sharps, flats", other))
        }
    };

    let mode = match harmony_type.parse::<HarmonyMode>() {
        Ok(mode) => mode,
        Err(e) => return error_response(e),
    };

    match quick_harmony(pitch, mode, spelling) {
        Ok(note) => Response::json(
            200,
            &QuickHarmonyResponse {
                melody_note: pitch.to_string(),
                harmony_note: note.map(|n| n.pitch),
                harmony_type: harmony_type.to_string(),
                message: format!("Generated {} harmony for {}", harmony_type, pitch),
            },
        ),
        Err(e) => error_response(e),
    }
}

/// Map an engine error to a client-facing response
fn error_response(e: HarmonyError) -> Response {
    match e {
        HarmonyError::UnsupportedMode(tag) => Response::error(
            400,
            &format!(
                "Invalid harmony type: {}. Valid types: {:?}",
                tag,
                HarmonyMode::valid_tags()
            ),
        ),
        HarmonyError::MalformedPitch { .. } | HarmonyError::EmptyMelody => {
            Response::error(400, &e.to_string())
        }
    }
}
