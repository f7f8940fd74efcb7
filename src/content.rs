//! Fixed bilingual copy shown by the kiosk.

pub const COMPANY_NAME: &str = "Kyowa Technologies Co., Ltd.";

pub static TAGLINE: &[&str] = &[
    "Connect with us!!!",
    "For Internships and Employment",
    "and MORE!!!",
];

pub const SUBTITLE_EN: &str = "Work with us in Japan!!! We will contact you!!!";
pub const SUBTITLE_JA: &str = "日本で一緒に働きましょう！ご連絡させていただきます！";

pub const RECRUITMENT_EMAIL: &str = "r-hirata@star.kyotec.co.jp";

/// A language section of a bilingual text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Japanese,
    English,
}

/// One titled block of the privacy notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeSection {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
}

static PRIVACY_JA: NoticeSection = NoticeSection {
    heading: "個人情報の取扱いについて",
    paragraphs: &[
        "本フォームで取得する個人情報（氏名、メールアドレス、その他入力内容）は、採用への応募お問い合わせへの対応およびそれに必要なご連絡の目的にのみ利用します。",
        "当社はPDPA（タイ個人データ保護法）の趣旨に基づき個人情報を適切に管理し、入力者への全ての連絡および要件が終了次第60日以内に、安全な方法で全データを削除・破棄します（法令等により保存が必要な場合を除きます）。ご本人の同意なく、第三者へ個人情報を提供することはありません。",
        "個人情報の取扱いに関するお問い合わせ：協和テクノロジイズ株式会社 採用担当 平田 E-mail： r-hirata@star.kyotec.co.jp",
    ],
};

static PRIVACY_EN: NoticeSection = NoticeSection {
    heading: "Privacy Notice",
    paragraphs: &[
        "Personal data collected through this form (including your name, email address, and any other information you provide) will be used only for responding to your inquiries and for the recruitment related purposes such as screening, communication, and administration, and only to the extent necessary for the recruitment operations.",
        "When collecting personal data, we clearly specify the purpose of use and obtain such data by lawful and fair means. Personal data will not be used for any purpose other than the recruitment application purposes. If it becomes necessary to change the purpose of use, we will notify you in advance and obtain your consent where required.",
        "The provision of personal data is entirely voluntary.",
        "We will not disclose or provide your personal data to any third party without the prior consent, except where disclosure is required by applicable laws or requested by courts, police, tax authorities, or other authorized public institutions.",
        "We comply with Thailand's Personal Data Protection Act (PDPA) and related laws and manage personal data in an appropriate and secure manner.",
        "We implement technical and organizational security measures to prevent unauthorized access, loss, leakage, alteration, or destruction of personal data.",
        "All personal data collected will be securely deleted or disposed of once all communications and related matters with Kyowa Technologies Co., Ltd. have been completed, and in any case within 60 days from the date of collection, unless retention is required by applicable laws.",
        "For inquiries regarding the handling of personal data: Kyowa Technologies Co., Ltd. – HR Contact: Ms. R. Hirata, E-mail: r-hirata@star.kyotec.co.jp",
    ],
};

/// Privacy notice sections, Japanese first.
pub fn privacy_notice() -> [&'static NoticeSection; 2] {
    [&PRIVACY_JA, &PRIVACY_EN]
}

static THANKS_JA: &[&str] = &[
    "本日はブースにお立ち寄りいただき、誠にありがとうございます。ご応募いただいた内容を確認させていただきました。後日、担当者よりご連絡させていただきます。",
    "私たちは、日本において止まってはならない社会インフラを支える通信技術に取り組んでいます。",
    "これから日本で学び、経験を積み、将来タイで活躍したいという皆様とお会いできることを楽しみにしております。",
];

static THANKS_EN: &[&str] = &[
    "Dear All,",
    "Thanks for visiting our booth today! we'll be in touch soon!",
    "Our mission is engineering the critical communication technologies that keep essential infrastructure running in Japan.",
    "Join us in Japan and grow with us! We guide you and we learn together!",
];

static FAILURE_JA: &[&str] = &[
    "申し訳ございません。ご登録内容を送信できませんでした。",
    "お手数ですが、ブースのスタッフにお声がけください。",
];

static FAILURE_EN: &[&str] = &[
    "Sorry, we could not send your registration.",
    "Please let a member of our booth staff know.",
];

/// Closing block under the confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub closing: String,
    pub signer: String,
    pub title: String,
    pub contact: String,
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            closing: "Yours sincerely,".into(),
            signer: "十河元太郎 (Gentaro Sogo)".into(),
            title: "CEO 協和テクノロジィズ株式会社 (Kyowa Technologies Co., Ltd.)".into(),
            contact: format!(
                "採用専用メールアドレス / Recruitment dedicated email address: {RECRUITMENT_EMAIL}"
            ),
        }
    }
}

/// What the confirmation dialog says: which languages, and who signs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationContent {
    /// Sections shown, in order.
    pub languages: Vec<Language>,
    pub signature: Signature,
}

impl Default for ConfirmationContent {
    fn default() -> Self {
        Self {
            languages: vec![Language::Japanese, Language::English],
            signature: Signature::default(),
        }
    }
}

impl ConfirmationContent {
    pub const TITLE: &'static str = "送信完了 / Registration Complete";
    pub const FAILURE_TITLE: &'static str = "送信エラー / Submission Failed";
    pub const EMAIL_HEADING: &'static str = "確認メール / Confirmation Email";
    pub const CLOSE: &'static str = "閉じる / Close";

    /// Thank-you paragraphs for one language.
    pub fn thanks(language: Language) -> &'static [&'static str] {
        match language {
            Language::Japanese => THANKS_JA,
            Language::English => THANKS_EN,
        }
    }

    /// Failure paragraphs for one language.
    pub fn failure(language: Language) -> &'static [&'static str] {
        match language {
            Language::Japanese => FAILURE_JA,
            Language::English => FAILURE_EN,
        }
    }
}
