use std::net::SocketAddr;
use std::path::PathBuf;

use warp::Filter;

/// Service worker script, served from the root so that it controls the
/// whole application
const SERVICE_WORKER: &str = "sw.js";

/// Static files of the application, request logging included.
pub fn routes(
    public_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_worker = warp::path(SERVICE_WORKER)
        .and(warp::path::end())
        .and(warp::fs::file(public_dir.join(SERVICE_WORKER)))
        .with(warp::reply::with::header("Service-Worker-Allowed", "/"))
        // a stale worker would keep serving the previous build
        .with(warp::reply::with::header("Cache-Control", "no-cache"));

    service_worker
        .or(warp::fs::dir(public_dir))
        .with(warp::log("soundboard::static"))
}

pub async fn serve(public_dir: PathBuf, socket: SocketAddr) {
    log::info!("serving {} on http://{}", public_dir.display(), socket);
    warp::serve(routes(public_dir)).run(socket).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn public_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("soundboard-server-{}", name));
        fs::create_dir_all(dir.join("sounds")).unwrap();
        fs::write(dir.join("index.html"), "<html>board</html>").unwrap();
        fs::write(dir.join(SERVICE_WORKER), "self.addEventListener('fetch', () => {});").unwrap();
        fs::write(dir.join("sounds").join("sound1.mp3"), b"ID3").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_static_files() {
        let filter = routes(public_dir("static"));

        let res = warp::test::request().path("/index.html").reply(&filter).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.body().as_ref(), b"<html>board</html>");
        assert!(res.headers().get("Service-Worker-Allowed").is_none());

        let res = warp::test::request().path("/sounds/sound1.mp3").reply(&filter).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "audio/mpeg");
    }

    #[tokio::test]
    async fn test_service_worker_headers() {
        let filter = routes(public_dir("worker"));

        let res = warp::test::request().path("/sw.js").reply(&filter).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["Service-Worker-Allowed"], "/");
        assert_eq!(res.headers()["Cache-Control"], "no-cache");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let filter = routes(public_dir("missing"));

        let res = warp::test::request().path("/sounds/sound99.mp3").reply(&filter).await;
        assert_eq!(res.status(), 404);
    }
}
