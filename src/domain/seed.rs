//! Static seed data loaded into the in-memory state at startup.

use time::{Date, OffsetDateTime};

use super::entities::{EventRecord, PromotionKind, PromotionRecord, SiteSettingsRecord};
use super::schedule::date_key;

/// Known cities offered in the schedule filter. Events may carry labels
/// outside this list; it only drives the dropdown.
pub const CITIES: [&str; 6] = [
    "Hà Nội",
    "TP. Hồ Chí Minh",
    "Đà Nẵng",
    "Cần Thơ",
    "Hải Phòng",
    "Nha Trang",
];

pub const DEFAULT_EVENT_TIME: &str = "19:00 - 21:00";

pub fn default_settings() -> SiteSettingsRecord {
    SiteSettingsRecord {
        logo_url: "https://cdn.haitrieu.com/wp-content/uploads/2022/12/Logo-Heineken-Vietnam.png"
            .to_string(),
        hero_image:
            "https://images.unsplash.com/photo-1575037614876-c38a4d44f5b8?q=80&w=2070&auto=format&fit=crop"
                .to_string(),
        hero_title: "Khuấy Động Cuộc Vui\nCùng Heineken Vietnam".to_string(),
        hero_subtitle: "Khám phá lịch trình các sự kiện sôi động nhất tại các điểm bán trên toàn \
                        quốc. Trải nghiệm đẳng cấp, tận hưởng từng khoảnh khắc."
            .to_string(),
        cta_title: "Bạn đã sẵn sàng nhập tiệc?".to_string(),
        cta_description: "Tìm ngay địa điểm gần nhất và tham gia vào không khí lễ hội cùng chúng \
                          tôi."
            .to_string(),
        schedule_title: "Lịch Trình Sự Kiện".to_string(),
        schedule_subtitle: "Tìm kiếm và theo dõi các hoạt động activation mới nhất.".to_string(),
        promotions: default_promotions(),
        updated_at: OffsetDateTime::now_utc(),
    }
}

fn default_promotions() -> Vec<PromotionRecord> {
    vec![
        PromotionRecord {
            id: "1".to_string(),
            title: "Heineken - Nhẹ Êm Mà Đậm Chất".to_string(),
            image:
                "https://images.unsplash.com/photo-1623592863624-9b8824142fb7?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            brand: "Heineken".to_string(),
            kind: PromotionKind::Activation,
            content: "Tham gia ngay chuỗi sự kiện Heineken để trải nghiệm hương vị bia thượng hạng...\n\n\
                      1. Thời gian: Từ 01/11 đến 31/12\n\
                      2. Địa điểm: Các beer club trên toàn quốc\n\
                      3. Quà tặng: Cơ hội nhận ngay 1 thùng bia Heineken Silver khi check-in tại sự kiện."
                .to_string(),
        },
        PromotionRecord {
            id: "2".to_string(),
            title: "Tiger - Sảng Khoái Bùng Nổ".to_string(),
            image:
                "https://images.unsplash.com/photo-1567602336688-66236b2886f4?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            brand: "Tiger".to_string(),
            kind: PromotionKind::Activation,
            content: "Đánh thức bản lĩnh cùng Tiger Beer. Đừng bỏ lỡ đêm nhạc EDM sôi động...\n\n\
                      Thể lệ tham dự:\n\
                      - Mua 1 tháp bia Tiger tặng 1 phiếu bốc thăm\n\
                      - Giải nhất: iPhone 15 Pro Max"
                .to_string(),
        },
        PromotionRecord {
            id: "3".to_string(),
            title: "Bia Việt - Tự Hào Chất Việt".to_string(),
            image:
                "https://images.unsplash.com/photo-1608270586620-248524c67de9?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            brand: "Bia Việt".to_string(),
            kind: PromotionKind::Awo,
            content: "Bia Việt kết nối mọi người, cùng nâng ly chúc mừng chiến thắng đội tuyển \
                      Việt Nam."
                .to_string(),
        },
        PromotionRecord {
            id: "4".to_string(),
            title: "Strongbow - Cider Chill Phết".to_string(),
            image:
                "https://images.unsplash.com/photo-1571616428782-9cb99e46a7be?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            brand: "Strongbow".to_string(),
            kind: PromotionKind::Awo,
            content: "Chill nhẹ nhàng cùng Strongbow Cider vị dâu đỏ mọng. Không gian âm nhạc \
                      Acoustic lãng mạn đang chờ bạn."
                .to_string(),
        },
    ]
}

/// Demo schedule. The first event lands on "today" so a fresh install always
/// shows a live row.
pub fn seed_events(today: Date) -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: "1".to_string(),
            city: "Hà Nội".to_string(),
            date: date_key(today),
            time: "19:00 - 21:00".to_string(),
            venue: "Sky Bar 360".to_string(),
            address: "54 Liễu Giai, Ba Đình".to_string(),
            map_link: None,
            brand: "Heineken".to_string(),
            description: Some("Đêm nhạc acoustic chill".to_string()),
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        },
        EventRecord {
            id: "2".to_string(),
            city: "TP. Hồ Chí Minh".to_string(),
            date: "2023-11-16".to_string(),
            time: "20:00 - 22:00".to_string(),
            venue: "Beer Club Vuvuzela".to_string(),
            address: "11B Nguyễn Bỉnh Khiêm, Quận 1".to_string(),
            map_link: None,
            brand: "Tiger".to_string(),
            description: Some("Sôi động cùng DJ Tít".to_string()),
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        },
        EventRecord {
            id: "3".to_string(),
            city: "Đà Nẵng".to_string(),
            date: "2023-11-17".to_string(),
            time: "18:30 - 20:30".to_string(),
            venue: "Golden Pine Pub".to_string(),
            address: "52 Bạch Đằng, Hải Châu 1".to_string(),
            map_link: Some("https://goo.gl/maps/example".to_string()),
            brand: "Larue".to_string(),
            description: Some("Tiệc bia bên sông Hàn".to_string()),
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        },
        EventRecord {
            id: "4".to_string(),
            city: "Nha Trang".to_string(),
            date: "2023-11-22".to_string(),
            time: "16:00 - 19:00".to_string(),
            venue: "Sailing Club".to_string(),
            address: "72-74 Trần Phú, Lộc Thọ".to_string(),
            map_link: None,
            brand: "Bivina".to_string(),
            description: Some("Beach Party sôi động".to_string()),
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        },
        EventRecord {
            id: "5".to_string(),
            city: "Hà Nội".to_string(),
            date: "2023-11-23".to_string(),
            time: "18:00 - 20:00".to_string(),
            venue: "Tạ Hiện Corner".to_string(),
            address: "Ngã tư Tạ Hiện - Lương Ngọc Quyến".to_string(),
            map_link: None,
            brand: "Bia Việt".to_string(),
            description: Some("Street Food & Beer".to_string()),
            region: None,
            outlet_id: None,
            sale_rep: None,
            bu: None,
            scale: None,
        },
    ]
}
