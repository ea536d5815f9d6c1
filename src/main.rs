#[tokio::main]
async fn main() {
    if let Err(e) = todo_list::start_server().await {
        eprintln!("todo-list: {e}");
        std::process::exit(1);
    }
}
