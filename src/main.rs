// リリースビルドではWindowsのコンソールウィンドウを表示しない
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    paysnap_lib::run()
}
