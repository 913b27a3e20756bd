fn main() -> Result<(), Box<dyn std::error::Error>> {
    mpdalbums::runtime::run()
}
