//! HTTP サーバーの例 (tokio)
//!
//! 使い方:
//!   # ポート 42069 で起動
//!   cargo run -p httpfromtcp_server
//!
//!   # ポートとログレベルを指定
//!   cargo run -p httpfromtcp_server -- --port 8080 --log-level debug
//!
//! 動作確認:
//!   curl -v http://127.0.0.1:42069/
//!   curl -v http://127.0.0.1:42069/yourproblem
//!   curl -v -X POST --data 'hello world!' http://127.0.0.1:42069/echo

use httpfromtcp::{Request, Response, StatusCode};
use tokio_httpfromtcp::{Router, Server};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

struct ServerOptions {
    host: String,
    port: u16,
    buffer_size: usize,
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(options.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let addr = format!("{}:{}", options.host, options.port);
    let server = Server::bind(&addr)
        .await?
        .initial_buffer_size(options.buffer_size);
    tracing::info!("HTTP server listening on http://{}", server.local_addr()?);

    server.serve(routes()).await?;
    Ok(())
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "httpfromtcp_server";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --host オプション
    let host: String = noargs::opt("host")
        .doc("Address to listen on")
        .default("127.0.0.1")
        .take(&mut args)
        .then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("42069")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --buffer-size オプション
    let buffer_size: usize = noargs::opt("buffer-size")
        .doc("Initial read buffer size in bytes")
        .default("2048")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --log-level オプション
    let log_level: Level = noargs::opt("log-level")
        .doc("Log level (trace, debug, info, warn, error)")
        .default("info")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    Ok(ServerOptions {
        host,
        port,
        buffer_size,
        log_level,
    })
}

fn routes() -> Router {
    Router::new()
        .get("/", |_: &Request| {
            html(
                StatusCode::Ok,
                "200 OK",
                "Success!",
                "Your request was an absolute banger.",
            )
        })
        .get("/yourproblem", |_: &Request| {
            html(
                StatusCode::BadRequest,
                "400 Bad Request",
                "Bad Request",
                "Your request honestly kinda sucked.",
            )
        })
        .get("/myproblem", |_: &Request| {
            html(
                StatusCode::InternalServerError,
                "500 Internal Server Error",
                "Internal Server Error",
                "Okay, you know what? This one is on me.",
            )
        })
        .post("/echo", |request: &Request| {
            let mut response = Response::new(StatusCode::Ok).body(request.body().to_vec());
            if let Some(content_type) = request.header("Content-Type") {
                response = response.header("Content-Type", content_type);
            }
            response
        })
}

fn html(status: StatusCode, title: &str, heading: &str, message: &str) -> Response {
    let page = format!(
        "<html>\n  <head>\n    <title>{}</title>\n  </head>\n  <body>\n    <h1>{}</h1>\n    <p>{}</p>\n  </body>\n</html>\n",
        title, heading, message
    );
    Response::new(status)
        .header("Content-Type", "text/html")
        .body(page.into_bytes())
}
