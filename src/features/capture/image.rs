use crate::shared::errors::AppResult;
use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::Path;

/// 拡張子からMIMEタイプを推定する
///
/// # 引数
/// * `path` - 画像ファイルのパス
///
/// # 戻り値
/// MIMEタイプ文字列（不明な拡張子はimage/jpeg扱い）
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

/// 画像ファイルを読み込んでdata URLにエンコードする
///
/// ファイル選択経由のキャプチャはここでカメラ経由と同じ
/// 自己完結のエンコード済み文字列表現に揃えられる。
///
/// # 引数
/// * `path` - 画像ファイルのパス
///
/// # 戻り値
/// `data:<mime>;base64,<data>`形式の文字列、または読み込み失敗時はエラー
pub fn encode_image_file(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)?;
    let mime_type = mime_from_extension(path);
    let encoded = general_purpose::STANDARD.encode(&bytes);

    Ok(format!("data:{mime_type};base64,{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.png")), "image/png");
        assert_eq!(mime_from_extension(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_from_extension(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a.webp")), "image/webp");

        // 不明な拡張子・拡張子なしはJPEG扱い
        assert_eq!(mime_from_extension(Path::new("a.xyz")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a")), "image/jpeg");
    }

    #[test]
    fn test_encode_image_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let data_url = encode_image_file(&path).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));

        // base64部分を復号すると元のバイト列に戻る
        let encoded = data_url.split(',').nth(1).unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, [0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn test_encode_image_file_missing() {
        let result = encode_image_file(Path::new("/nonexistent/receipt.jpg"));
        assert!(result.is_err());
    }
}
