fn main() {
    time_report_frontend::boot();
}
