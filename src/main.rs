fn main() {
    pak_updater_lib::run()
}
