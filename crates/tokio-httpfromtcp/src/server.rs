//! HTTP サーバー
//!
//! 1 接続につき 1 リクエストを読み取り、レスポンスを書いて接続を閉じる。
//!
//! ## 使い方
//!
//! ```ignore
//! use tokio_httpfromtcp::{Router, Server};
//!
//! let server = Server::bind("127.0.0.1:42069").await?;
//! server.serve(router).await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use httpfromtcp::{ReaderLimits, Request, Response};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::{TcpListener, TcpStream};

use crate::error::Result;
use crate::reader::read_request;

/// HTTP リクエストハンドラー
///
/// パースエラーを持つリクエストもそのまま渡される。
pub trait Handler: Send + Sync + 'static {
    /// リクエストを処理してレスポンスを返す
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send;
}

/// 関数からハンドラーを作成
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    fn handle(&self, request: Request) -> impl Future<Output = Response> + Send {
        (self)(request)
    }
}

/// HTTP サーバー
pub struct Server {
    listener: TcpListener,
    limits: ReaderLimits,
    write_buffer_size: usize,
}

impl Server {
    /// 指定アドレスにバインド
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            limits: ReaderLimits::default(),
            write_buffer_size: 8192,
        })
    }

    /// 読み取り制限を設定
    pub fn limits(mut self, limits: ReaderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// 読み取りバッファの初期サイズを設定
    pub fn initial_buffer_size(mut self, size: usize) -> Self {
        self.limits = self.limits.initial_buffer_size(size);
        self
    }

    /// 書き込みバッファサイズを設定
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// ローカルアドレスを取得
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// サーバーを起動
    ///
    /// accept のエラーだけが呼び出し元に返る。接続ごとのエラーはログに出して、その接続だけを閉じる。
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        let config = Arc::new(self.connection_config());
        let handler = Arc::new(handler);
        tracing::info!(addr = ?self.listener.local_addr().ok(), "server listening");

        loop {
            let (stream, peer_addr) = self.listener.accept().await?;
            let config = config.clone();
            let handler = handler.clone();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer_addr, config, handler).await {
                    tracing::error!(%peer_addr, error = %e, "connection error");
                }
            });
        }
    }

    /// 単一の接続を処理 (テスト用)
    pub async fn handle_one<H: Handler>(self, handler: H) -> Result<()> {
        let (stream, peer_addr) = self.listener.accept().await?;
        let config = Arc::new(self.connection_config());
        handle_connection(stream, peer_addr, config, Arc::new(handler)).await
    }

    fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            limits: self.limits.clone(),
            write_buffer_size: self.write_buffer_size,
        }
    }
}

struct ConnectionConfig {
    limits: ReaderLimits,
    write_buffer_size: usize,
}

/// 接続を処理
async fn handle_connection<H: Handler>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ConnectionConfig>,
    handler: Arc<H>,
) -> Result<()> {
    tracing::info!(%peer_addr, "connection accepted");
    let (mut reader, writer) = stream.into_split();
    let mut writer = BufWriter::with_capacity(config.write_buffer_size, writer);

    let request = read_request(&mut reader, &config.limits).await?;
    match request.error() {
        Some(error) => tracing::warn!(%peer_addr, %error, "malformed request"),
        None => tracing::info!(
            %peer_addr,
            method = request.method(),
            target = request.target(),
            "request"
        ),
    }

    let mut response = handler.handle(request).await;
    response.add_default_headers();

    writer.write_all(&response.encode()).await?;
    writer.flush().await?;
    writer.shutdown().await?;

    tracing::info!(%peer_addr, status = response.status.code(), "connection closed");
    Ok(())
}
