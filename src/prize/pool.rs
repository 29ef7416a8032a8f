//! Built-in prize pool.

use super::tier::{PrizeTier, SubItem, TierKind, TierRange};

/// Tiers of the standard pool, in ascending range order.
pub fn standard_tiers() -> Vec<PrizeTier> {
    vec![
        PrizeTier::new(
            TierKind::Instant,
            "即时反馈包 (Instant Feedback)",
            "50%",
            TierRange::new(1, 50),
            vec![
                SubItem::new(
                    "food",
                    "味蕾暴击",
                    "点一份奶茶/蛋糕/汉堡/炸鸡。",
                    "Utensils",
                    "唯有美食与爱不可辜负。这一刻，把体重秤扔到一边，感受多巴胺的欢呼！",
                ),
                SubItem::new(
                    "video",
                    "精神食粮",
                    "立刻观看一期你最爱的UP主视频。",
                    "Youtube",
                    "精神电池电量过低？UP主的视频是最好的快充。按下播放键，快乐即刻送达。",
                ),
                SubItem::new(
                    "game",
                    "一局定胜负",
                    "开启一局完整的游戏对战或副本。",
                    "Gamepad2",
                    "现实世界暂停服务。欢迎回到你忠诚的艾泽拉斯/峡谷/海拉鲁，英雄，去赢下这一局！",
                ),
                SubItem::new(
                    "surf",
                    "数字神游",
                    "进行15分钟的“无主题”网上冲浪。",
                    "Globe",
                    "漫无目的才是互联网的精髓。迷失在信息的海洋里吧，也许会捡到意想不到的贝壳。",
                ),
            ],
        ),
        PrizeTier::new(
            TierKind::Immersive,
            "沉浸式体验 (Immersive)",
            "30%",
            TierRange::new(51, 80),
            vec![
                SubItem::new(
                    "drama",
                    "剧情推进许可",
                    "完整观看一集你正在追的剧集/动画。",
                    "Film",
                    "剧情卡在关键点太难受？解锁封印！现在没有任何事情比知道‘接下来发生了什么’更重要。",
                ),
                SubItem::new(
                    "live",
                    "Live朝圣",
                    "观看一场偶像的完整演唱会录像(或30分钟)。",
                    "Music2",
                    "戴上耳机，关上灯。即使身在卧室，灵魂也已经飞到了万人欢呼的体育馆中心。",
                ),
                SubItem::new(
                    "bed",
                    "绝对舒适模式",
                    "躲进被窝，享受20分钟的纯粹放松。",
                    "BedDouble",
                    "被窝是神圣的不可侵犯领土。躲进去，把世界关在外面，做20分钟的国王。",
                ),
                SubItem::new(
                    "learn",
                    "好奇心驱动",
                    "选择一个随机主题，进行30分钟的深度探索。",
                    "Search",
                    "大脑需要一点新鲜的刺激。去探索那个你一直好奇却没空了解的冷知识吧！",
                ),
            ],
        ),
        // Order matters: odd calendar days pick index 0, even days index 1.
        PrizeTier::new(
            TierKind::Wishlist,
            "愿望清单兑换 (Wishlist)",
            "15%",
            TierRange::new(81, 95),
            vec![
                SubItem::new(
                    "digital",
                    "数字典藏+1",
                    "购买一款愿望单游戏/电影/专辑 (单数日期)。",
                    "Smartphone",
                    "购物车里的那个图标已经等了太久。就是今天，点击购买，把数据变成专属于你的宝藏。",
                ),
                SubItem::new(
                    "physical",
                    "实体质感+1",
                    "购买一个提升生活品质的实体小物 (双数日期)。",
                    "PackageCheck",
                    "拆快递是现代人的治愈仪式。那个提升幸福感的小物，现在它是你的了。",
                ),
            ],
        ),
        PrizeTier::new(
            TierKind::Legendary,
            "白日梦许可 (Daydream)",
            "5%",
            TierRange::new(96, 100),
            vec![SubItem::new(
                "daydream",
                "强制摸鱼特权",
                "立刻放下工作/学习，进行30分钟极致放松。",
                "CloudSun",
                "恭喜触发隐藏彩蛋！系统强制执行‘什么都不做’指令。看着云发呆，才是最高级的生产力。",
            )],
        ),
    ]
}
